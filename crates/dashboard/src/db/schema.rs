//! Table definitions for the dashboard database.
//!
//! The schema is small and fixed, so it lives here as DDL rather than as a
//! migration history. Dropping is unconditional: whatever the tables held is
//! gone once [`drop_tables`] returns.

use sqlx::PgPool;
use tracing::{info, instrument};

use super::RepositoryError;

/// Character limit of every `VARCHAR(255)` column.
pub const MAX_VARCHAR_LEN: usize = 255;

/// Tables managed by the dashboard, in the order they are dropped.
pub const TABLES: [&str; 4] = ["users", "invoices", "customers", "revenue"];

const DROP_TABLES: &str = "DROP TABLE IF EXISTS users, invoices, customers, revenue";

const CREATE_UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

const CREATE_USERS: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
";

const CREATE_CUSTOMERS: &str = r"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        image_url VARCHAR(255) NOT NULL
    )
";

const CREATE_INVOICES: &str = r"
    CREATE TABLE IF NOT EXISTS invoices (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        customer_id UUID NOT NULL,
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL,
        date DATE NOT NULL
    )
";

const CREATE_REVENUE: &str = r"
    CREATE TABLE IF NOT EXISTS revenue (
        month VARCHAR(4) NOT NULL UNIQUE,
        revenue INT NOT NULL
    )
";

/// Statements that bring an empty database to the current schema.
const CREATE_STATEMENTS: [(&str, &str); 5] = [
    ("uuid-ossp extension", CREATE_UUID_EXTENSION),
    ("users", CREATE_USERS),
    ("customers", CREATE_CUSTOMERS),
    ("invoices", CREATE_INVOICES),
    ("revenue", CREATE_REVENUE),
];

/// Drop every dashboard table if it exists.
///
/// # Errors
///
/// Returns error if the statement fails.
#[instrument(skip(pool))]
pub async fn drop_tables(pool: &PgPool) -> Result<(), RepositoryError> {
    info!("Dropping all tables");
    sqlx::query(DROP_TABLES).execute(pool).await?;
    info!(tables = ?TABLES, "All tables dropped");
    Ok(())
}

/// Create the UUID extension and every dashboard table if missing.
///
/// # Errors
///
/// Returns error if any statement fails (e.g. the role may not create extensions).
#[instrument(skip(pool))]
pub async fn create_tables(pool: &PgPool) -> Result<(), RepositoryError> {
    for (name, statement) in CREATE_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
        info!(object = name, "Created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_is_dropped_and_created() {
        for table in TABLES {
            assert!(DROP_TABLES.contains(table), "{table} missing from DROP");
            assert!(
                CREATE_STATEMENTS
                    .iter()
                    .any(|(_, sql)| sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table} ("))),
                "{table} missing from CREATE"
            );
        }
    }

    #[test]
    fn test_varchar_limit_matches_ddl() {
        let column = format!("VARCHAR({MAX_VARCHAR_LEN})");
        assert!(CREATE_USERS.contains(&format!("name {column}")));
        for name in ["name", "email", "image_url"] {
            assert!(CREATE_CUSTOMERS.contains(&format!("{name} {column}")), "{name}");
        }
    }

    #[test]
    fn test_extension_created_before_tables() {
        assert_eq!(CREATE_STATEMENTS[0].1, CREATE_UUID_EXTENSION);
    }
}
