//! Fixture inspection commands.

use std::path::Path;

use tracing::{error, info};

use invoice_dashboard::fixtures::FixtureError;

use super::load_fixtures;

/// Parse and validate fixtures, logging a summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any
/// validation problem is found.
pub async fn check(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = load_fixtures(path).await?;

    info!(
        users = fixtures.users.len(),
        customers = fixtures.customers.len(),
        invoices = fixtures.invoices.len(),
        revenue = fixtures.revenue.len(),
        "Parsed fixtures"
    );

    if let Err(FixtureError::Invalid(problems)) = fixtures.validate() {
        error!("Fixture validation failed:");
        for problem in &problems {
            error!("  - {problem}");
        }
        return Err(format!("{} validation errors found", problems.len()).into());
    }

    let expected = fixtures.expected_rows();
    info!(
        users = expected.users,
        customers = expected.customers,
        invoices = expected.invoices,
        revenue = expected.revenue,
        "Fixtures valid; a seed would insert {} rows",
        expected.total()
    );
    Ok(())
}
