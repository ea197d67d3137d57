//! Invoice dashboard CLI - database seeding and fixture tools.
//!
//! # Usage
//!
//! ```bash
//! # Drop every table and reload the bundled fixtures
//! dash-cli seed --yes
//!
//! # Same, from another fixture file
//! dash-cli seed --fixtures ./fixtures.yaml --yes
//!
//! # Parse and validate fixtures without touching the database
//! dash-cli fixtures check --fixtures ./fixtures.yaml
//! ```
//!
//! # Commands
//!
//! - `seed` - Reset the database from fixtures (destructive)
//! - `fixtures check` - Validate a fixture file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dash-cli")]
#[command(author, version, about = "Invoice dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop, recreate and reseed every dashboard table
    Seed {
        /// Fixture file (defaults to the bundled placeholder data)
        #[arg(short, long)]
        fixtures: Option<PathBuf>,

        /// Confirm that all existing data may be dropped
        #[arg(long)]
        yes: bool,
    },
    /// Inspect fixture data
    Fixtures {
        #[command(subcommand)]
        action: FixturesAction,
    },
}

#[derive(Subcommand)]
enum FixturesAction {
    /// Parse and validate fixtures
    Check {
        /// Fixture file (defaults to the bundled placeholder data)
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoice_dashboard=info,dash_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { fixtures, yes } => {
            commands::seed::run(fixtures.as_deref(), yes).await?;
        }
        Commands::Fixtures { action } => match action {
            FixturesAction::Check { fixtures } => {
                commands::fixtures::check(fixtures.as_deref()).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_args() {
        let cli = Cli::try_parse_from(["dash-cli", "seed", "--fixtures", "data.yaml", "--yes"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { fixtures: Some(ref p), yes: true }) if p.as_os_str() == "data.yaml"
        ));

        let cli = Cli::try_parse_from(["dash-cli", "seed"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { fixtures: None, yes: false })
        ));
    }
}
