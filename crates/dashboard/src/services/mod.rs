//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `batch` - Bounded-concurrency fan-out with first-error semantics
//! - `password` - Argon2id password hashing
//! - `seed` - Drop, recreate and repopulate every table from fixtures

pub mod batch;
pub mod password;
pub mod seed;

pub use batch::run_bounded;
pub use password::{PasswordError, hash_password, verify_password};
pub use seed::{SeedError, SeedReport, reseed};
