//! Invoice dashboard library.
//!
//! Serves the invoice listing and intake form, and the `/seed` route that
//! resets the database from fixture data. The server binary and the CLI
//! both build on this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod fixtures;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

/// Select `ring` as the process-wide rustls crypto provider.
///
/// sqlx and Sentry's HTTP transport both build rustls clients; with more
/// than one provider compiled in, rustls needs an explicit default.
///
/// # Errors
///
/// Returns an error if a different provider was already installed.
pub fn install_crypto_provider() -> Result<(), &'static str> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "failed to install rustls crypto provider")
}
