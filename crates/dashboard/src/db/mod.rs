//! Database operations for the dashboard `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Dashboard login accounts (Argon2id password hashes)
//! - `customers` - Invoice recipients
//! - `invoices` - One row per invoice, amounts in cents
//! - `revenue` - Monthly revenue figures for the overview chart
//!
//! # Schema
//!
//! There are no migrations: the schema is (re)created by the seed operation,
//! see [`schema`].

pub mod customers;
pub mod invoices;
pub mod revenue;
pub mod schema;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use customers::CustomerRepository;
pub use invoices::InvoiceRepository;

/// Rows per multi-row `INSERT` statement, well under the bind parameter limit.
pub(crate) const INSERT_CHUNK_SIZE: usize = 500;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Build connection options from configuration.
///
/// The SSL mode from configuration overrides any `sslmode` in the URL.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(config.url.expose_secret())?.ssl_mode(config.ssl_mode))
}

/// Pool settings shared by the server and the CLI.
#[must_use]
pub fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options().connect_with(connect_options(config)?).await
}
