//! Reset the dashboard database from fixtures.
//!
//! Runs the same operation as `GET /seed` without going through HTTP, so the
//! route can stay disabled in deployed environments.
//!
//! # Environment Variables
//!
//! - `POSTGRES_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `POSTGRES_SSL_MODE` - TLS mode, `require` by default
//! - `DASHBOARD_SEED_CONCURRENCY` - concurrent password hashes

use std::path::Path;

use tracing::info;

use invoice_dashboard::config::DashboardConfig;
use invoice_dashboard::db;
use invoice_dashboard::services::reseed;

use super::load_fixtures;

/// Drop every table and reload fixtures.
///
/// # Arguments
///
/// * `path` - Fixture file, or `None` for the bundled data
/// * `confirmed` - Must be true; seeding destroys all existing data
///
/// # Errors
///
/// Returns an error if not confirmed, if configuration or fixtures are
/// invalid, or if any database operation fails.
pub async fn run(path: Option<&Path>, confirmed: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !confirmed {
        return Err("seeding drops every table; pass --yes to confirm".into());
    }

    invoice_dashboard::install_crypto_provider()?;
    let config = DashboardConfig::from_env()?;

    // Read and validate fixtures before connecting to the database
    let fixtures = load_fixtures(path).await?;
    fixtures.validate()?;

    let pool = db::create_pool(&config.database).await?;
    info!("Connected to database");

    let report = reseed(&pool, &fixtures, config.seed.hash_concurrency).await?;

    info!("Seeding complete!");
    info!("  Users: {}", report.users);
    info!("  Customers: {}", report.customers);
    info!("  Invoices: {}", report.invoices);
    info!("  Revenue months: {}", report.revenue);

    Ok(())
}
