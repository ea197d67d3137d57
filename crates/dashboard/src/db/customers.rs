//! Customer repository.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{INSERT_CHUNK_SIZE, RepositoryError};
use crate::models::Customer;

/// Repository for customer reads used by the dashboard pages.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All customers, ordered by name, for the invoice form's select list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, name, email, image_url
            FROM customers
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(customers)
    }
}

/// Insert customers, skipping any whose ID already exists.
///
/// # Errors
///
/// Returns error if any statement fails.
#[instrument(skip(conn, customers), fields(count = customers.len()))]
pub async fn insert_batch(
    conn: &mut PgConnection,
    customers: &[Customer],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0;

    for chunk in customers.chunks(INSERT_CHUNK_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO customers (id, name, email, image_url) ");
        builder.push_values(chunk, |mut row, customer| {
            row.push_bind(customer.id)
                .push_bind(&customer.name)
                .push_bind(&customer.email)
                .push_bind(&customer.image_url);
        });
        builder.push(" ON CONFLICT (id) DO NOTHING");

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        for customer in chunk {
            debug!(name = %customer.name, "Customer inserted");
        }
    }

    info!(inserted, "Customers seeded");
    Ok(inserted)
}
