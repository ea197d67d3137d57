//! Password hashing.
//!
//! Passwords are stored as Argon2id PHC strings. Hashing is CPU-bound, so
//! async callers should run it on the blocking pool.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Failure to produce a password hash.
#[derive(Debug, Error)]
#[error("password hashing error: {0}")]
pub struct PasswordError(String);

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `PasswordError` if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError(e.to_string()))
}

/// Check a password against a stored hash.
///
/// A malformed hash never verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
