//! Revenue repository.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{INSERT_CHUNK_SIZE, RepositoryError};
use crate::models::Revenue;

/// Insert monthly revenue rows, skipping months that already exist.
///
/// # Errors
///
/// Returns error if any statement fails.
#[instrument(skip(conn, revenue), fields(count = revenue.len()))]
pub async fn insert_batch(
    conn: &mut PgConnection,
    revenue: &[Revenue],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0;

    for chunk in revenue.chunks(INSERT_CHUNK_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO revenue (month, revenue) ");
        builder.push_values(chunk, |mut row, rev| {
            row.push_bind(&rev.month).push_bind(rev.revenue);
        });
        builder.push(" ON CONFLICT (month) DO NOTHING");

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        for rev in chunk {
            debug!(month = %rev.month, "Revenue inserted");
        }
    }

    info!(inserted, "Revenue seeded");
    Ok(inserted)
}
