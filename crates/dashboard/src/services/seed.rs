//! Drop, recreate and repopulate the dashboard tables.
//!
//! Fixtures are validated and every password hashed before anything is
//! dropped. After the drop and recreate, all rows go in through a single
//! transaction, so a failing insert leaves empty tables rather than a partial
//! data set.

use std::num::NonZeroUsize;

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, instrument};

use crate::db::{RepositoryError, customers, invoices, revenue, schema, users};
use crate::fixtures::{FixtureError, Fixtures};
use crate::models::{NewUser, UserFixture};

use super::batch::run_bounded;
use super::password::{PasswordError, hash_password};

/// Errors that can occur while reseeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Fixtures(#[from] FixtureError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<sqlx::Error> for SeedError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Rows inserted per table by one seed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedReport {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.users + self.customers + self.invoices + self.revenue
    }
}

/// Reset the database to exactly the given fixtures.
///
/// `hash_concurrency` bounds how many password hashes run at once on the
/// blocking pool.
///
/// # Errors
///
/// Returns `SeedError::Fixtures` before touching the database if the
/// fixtures are invalid, and the underlying error for any hashing or
/// database failure. A database failure after the drop leaves the tables
/// empty or missing.
#[instrument(skip(pool, fixtures), fields(
    users = fixtures.users.len(),
    customers = fixtures.customers.len(),
    invoices = fixtures.invoices.len(),
    revenue = fixtures.revenue.len(),
))]
pub async fn reseed(
    pool: &PgPool,
    fixtures: &Fixtures,
    hash_concurrency: NonZeroUsize,
) -> Result<SeedReport, SeedError> {
    fixtures.validate()?;
    let new_users = hash_users(&fixtures.users, hash_concurrency).await?;

    schema::drop_tables(pool).await?;
    schema::create_tables(pool).await?;

    let mut tx = pool.begin().await?;
    let report = SeedReport {
        users: users::insert_batch(&mut tx, &new_users).await?,
        customers: customers::insert_batch(&mut tx, &fixtures.customers).await?,
        invoices: invoices::insert_batch(&mut tx, &fixtures.invoices).await?,
        revenue: revenue::insert_batch(&mut tx, &fixtures.revenue).await?,
    };
    tx.commit().await?;

    info!(total = report.total(), "Database seeded");
    Ok(report)
}

/// Hash fixture passwords on the blocking pool, keeping fixture order.
async fn hash_users(
    fixtures: &[UserFixture],
    concurrency: NonZeroUsize,
) -> Result<Vec<NewUser>, SeedError> {
    run_bounded(fixtures.iter().cloned(), concurrency, |user| async move {
        let UserFixture {
            id,
            name,
            email,
            password,
        } = user;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
        Ok::<_, SeedError>(NewUser {
            id,
            name,
            email,
            password_hash,
        })
    })
    .await
}
