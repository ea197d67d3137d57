//! Invoice Dashboard Core - Shared types library.
//!
//! This crate provides the domain types used across the dashboard components:
//! - `dashboard` - HTTP server (invoice intake, listing, seed route)
//! - `cli` - Command-line tools for seeding and fixture checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is available behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, invoice status and money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
