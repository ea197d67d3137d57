//! Seed fixture data.
//!
//! The default data set is compiled into the binary from
//! `fixtures/placeholder-data.yaml`; the CLI can load another file with the
//! same shape.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use invoice_dashboard_core::{CustomerId, UserId};

use crate::db::schema::MAX_VARCHAR_LEN;
use crate::models::{Customer, InvoiceFixture, Revenue, UserFixture};

const EMBEDDED: &str = include_str!("../fixtures/placeholder-data.yaml");

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{} fixture problem(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),
}

/// The complete seed data set.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub invoices: Vec<InvoiceFixture>,
    #[serde(default)]
    pub revenue: Vec<Revenue>,
}

/// Rows per table a seed pass leaves behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpectedRows {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub revenue: usize,
}

impl ExpectedRows {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.users + self.customers + self.invoices + self.revenue
    }
}

impl Fixtures {
    /// The data set bundled with the binary.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Parse` if the bundled YAML is malformed.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_yaml_str(EMBEDDED)
    }

    /// Parse fixtures from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Parse` if the document does not match the schema.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Io` if the file cannot be read, or
    /// `FixtureError::Parse` if it is malformed.
    pub async fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    /// Problems that would make seeding fail or leave inconsistent data.
    ///
    /// Repeated IDs (or revenue months) are not problems: the inserts skip
    /// conflicting keys, so only the first occurrence is stored.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut emails: HashMap<&str, UserId> = HashMap::new();
        for user in &self.users {
            if user.password.is_empty() {
                problems.push(format!("user {}: password is empty", user.email));
            }
            check_length(&mut problems, "user", &user.email, "name", &user.name);
            match emails.get(user.email.as_str()) {
                Some(id) if *id != user.id => problems.push(format!(
                    "user {}: email {} already used by user {id}",
                    user.id, user.email
                )),
                Some(_) => {}
                None => {
                    emails.insert(&user.email, user.id);
                }
            }
        }

        for customer in &self.customers {
            for (column, value) in [
                ("name", &customer.name),
                ("email", &customer.email),
                ("image_url", &customer.image_url),
            ] {
                check_length(&mut problems, "customer", &customer.id, column, value);
            }
        }

        let customer_ids: HashSet<CustomerId> = self.customers.iter().map(|c| c.id).collect();
        for (i, invoice) in self.invoices.iter().enumerate() {
            if !customer_ids.contains(&invoice.customer_id) {
                problems.push(format!(
                    "invoice #{}: unknown customer {}",
                    i + 1,
                    invoice.customer_id
                ));
            }
            if invoice.amount.as_i32() < 0 {
                problems.push(format!("invoice #{}: amount is negative", i + 1));
            }
        }

        for rev in &self.revenue {
            if rev.month.is_empty() || rev.month.chars().count() > Revenue::MAX_MONTH_LEN {
                problems.push(format!(
                    "revenue month {:?}: must be 1 to {} characters",
                    rev.month,
                    Revenue::MAX_MONTH_LEN
                ));
            }
        }

        problems
    }

    /// Fail with every problem found, logging keys that will be skipped.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Invalid` listing all problems.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let expected = self.expected_rows();
        if expected.users < self.users.len()
            || expected.customers < self.customers.len()
            || expected.revenue < self.revenue.len()
        {
            warn!(
                ?expected,
                "Fixtures repeat some keys; repeated rows will be skipped"
            );
        }

        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(FixtureError::Invalid(problems))
        }
    }

    /// Row counts after seeding, accounting for conflict-skipped duplicates.
    #[must_use]
    pub fn expected_rows(&self) -> ExpectedRows {
        ExpectedRows {
            users: self.users.iter().map(|u| u.id).collect::<HashSet<_>>().len(),
            customers: self.customers.iter().map(|c| c.id).collect::<HashSet<_>>().len(),
            invoices: self.invoices.len(),
            revenue: self
                .revenue
                .iter()
                .map(|r| r.month.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

/// Record a problem if `value` does not fit a `VARCHAR(255)` column.
fn check_length(
    problems: &mut Vec<String>,
    kind: &str,
    key: &dyn std::fmt::Display,
    column: &str,
    value: &str,
) {
    let len = value.chars().count();
    if len > MAX_VARCHAR_LEN {
        problems.push(format!(
            "{kind} {key}: {column} is {len} characters, at most {MAX_VARCHAR_LEN} allowed"
        ));
    }
}
