//! Invoice repository.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{INSERT_CHUNK_SIZE, RepositoryError};
use crate::models::{InvoiceFixture, InvoiceSummary, NewInvoice};

/// Repository for invoice database operations.
pub struct InvoiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepository<'a> {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single validated invoice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, invoice), fields(id = %invoice.id, customer_id = %invoice.customer_id))]
    pub async fn create(&self, invoice: &NewInvoice) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(invoice.id)
        .bind(invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status)
        .bind(invoice.date)
        .execute(self.pool)
        .await?;

        info!(amount = invoice.amount.as_i32(), status = %invoice.status, "Invoice created");
        Ok(())
    }

    /// Every invoice with its customer, newest first.
    ///
    /// Invoices whose customer no longer exists are left out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is not recognised.
    #[instrument(skip(self))]
    pub async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, RepositoryError> {
        sqlx::query_as::<_, InvoiceSummary>(
            r"
            SELECT
                invoices.id,
                invoices.customer_id,
                customers.name,
                customers.email,
                customers.image_url,
                invoices.amount,
                invoices.status,
                invoices.date
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC, invoices.id
            ",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::ColumnDecode { index, source } => RepositoryError::DataCorruption(
                format!("invalid invoice column {index}: {source}"),
            ),
            other => RepositoryError::Database(other),
        })
    }
}

/// Insert fixture invoices; the database assigns their IDs.
///
/// # Errors
///
/// Returns error if any statement fails.
#[instrument(skip(conn, invoices), fields(count = invoices.len()))]
pub async fn insert_batch(
    conn: &mut PgConnection,
    invoices: &[InvoiceFixture],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0;

    for chunk in invoices.chunks(INSERT_CHUNK_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO invoices (customer_id, amount, status, date) ");
        builder.push_values(chunk, |mut row, invoice| {
            row.push_bind(invoice.customer_id)
                .push_bind(invoice.amount)
                .push_bind(invoice.status)
                .push_bind(invoice.date);
        });
        builder.push(" ON CONFLICT (id) DO NOTHING");

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        for invoice in chunk {
            debug!(
                amount = invoice.amount.as_i32(),
                customer_id = %invoice.customer_id,
                "Invoice inserted"
            );
        }
    }

    info!(inserted, "Invoices seeded");
    Ok(inserted)
}
