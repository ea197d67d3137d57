//! User repository.
//!
//! Users are only ever written by the seed operation, already hashed.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{INSERT_CHUNK_SIZE, RepositoryError};
use crate::models::NewUser;

/// Insert users, skipping any whose ID already exists.
///
/// Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns error if any statement fails (including a duplicate email, which
/// is not covered by the conflict clause).
#[instrument(skip(conn, users), fields(count = users.len()))]
pub async fn insert_batch(
    conn: &mut PgConnection,
    users: &[NewUser],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0;

    for chunk in users.chunks(INSERT_CHUNK_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO users (id, name, email, password) ");
        builder.push_values(chunk, |mut row, user| {
            row.push_bind(user.id)
                .push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(&user.password_hash);
        });
        builder.push(" ON CONFLICT (id) DO NOTHING");

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        for user in chunk {
            debug!(email = %user.email, "User inserted");
        }
    }

    info!(inserted, "Users seeded");
    Ok(inserted)
}

/// Fetch the stored password hash for an email.
///
/// # Errors
///
/// Returns error if the query fails.
pub async fn password_hash_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<String>, RepositoryError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT password FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(hash,)| hash))
}
