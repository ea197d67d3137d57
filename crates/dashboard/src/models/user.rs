//! User domain types.
//!
//! Plaintext passwords only exist in [`UserFixture`]; everything written to
//! the database goes through [`NewUser`], which carries a PHC hash string.

use serde::Deserialize;

use invoice_dashboard_core::UserId;

/// A user as listed in the fixture data, password in plaintext.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Deserialize)]
pub struct UserFixture {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for UserFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserFixture")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A user ready to insert, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
