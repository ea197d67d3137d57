//! CLI subcommands.

pub mod fixtures;
pub mod seed;

use std::path::Path;

use invoice_dashboard::fixtures::{FixtureError, Fixtures};

/// Load fixtures from `path`, or the bundled data set when `None`.
async fn load_fixtures(path: Option<&Path>) -> Result<Fixtures, FixtureError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading fixtures from file");
            Fixtures::from_file(path).await
        }
        None => Fixtures::embedded(),
    }
}
