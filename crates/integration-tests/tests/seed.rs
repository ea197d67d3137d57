//! Integration tests for the seed route.
//!
//! Requires a disposable `PostgreSQL` database in `TEST_DATABASE_URL`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::num::NonZeroUsize;

use reqwest::StatusCode;
use serde_json::Value;

use invoice_dashboard::db::{schema, users};
use invoice_dashboard::fixtures::Fixtures;
use invoice_dashboard::services::{reseed, verify_password};
use invoice_dashboard_integration_tests::{TestContext, test_config};

async fn seed(ctx: &TestContext) -> (StatusCode, Value) {
    let resp = ctx
        .client
        .get(ctx.url("/seed"))
        .send()
        .await
        .expect("Failed to call /seed");
    let status = resp.status();
    (status, resp.json().await.expect("seed response is JSON"))
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_seed_route_populates_every_table() {
    let ctx = TestContext::start().await;

    let (status, body) = seed(&ctx).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "message": "Database seeded successfully" }));

    assert_eq!(ctx.count("users").await, 1);
    assert_eq!(ctx.count("customers").await, 6);
    assert_eq!(ctx.count("invoices").await, 13);
    assert_eq!(ctx.count("revenue").await, 12);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_seeding_twice_leaves_one_row_per_fixture() {
    let ctx = TestContext::start().await;

    let (first, _) = seed(&ctx).await;
    let (second, _) = seed(&ctx).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    for (table, rows) in [("users", 1), ("customers", 6), ("invoices", 13), ("revenue", 12)] {
        assert_eq!(ctx.count(table).await, rows, "{table}");
    }
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_seeded_passwords_are_hashed() {
    let ctx = TestContext::start().await;
    seed(&ctx).await;

    let stored = users::password_hash_by_email(&ctx.pool, "user@nextmail.com")
        .await
        .unwrap()
        .expect("seeded user exists");

    assert_ne!(stored, "123456");
    assert!(verify_password("123456", &stored));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_seed_on_empty_database_reports_every_row() {
    let ctx = TestContext::start().await;
    schema::drop_tables(&ctx.pool).await.unwrap();

    let fixtures = Fixtures::embedded().unwrap();
    let report = reseed(&ctx.pool, &fixtures, test_config().seed.hash_concurrency)
        .await
        .unwrap();

    let rows = fixtures.users.len()
        + fixtures.customers.len()
        + fixtures.invoices.len()
        + fixtures.revenue.len();
    assert_eq!(report.total(), u64::try_from(rows).unwrap());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_repeated_fixture_keys_are_skipped() {
    let ctx = TestContext::start().await;

    let mut fixtures = Fixtures::embedded().unwrap();
    fixtures.customers.push(fixtures.customers[0].clone());
    fixtures.revenue.push(fixtures.revenue[0].clone());

    let report = reseed(&ctx.pool, &fixtures, NonZeroUsize::MIN).await.unwrap();

    assert_eq!(report.customers, 6);
    assert_eq!(report.revenue, 12);
    assert_eq!(ctx.count("customers").await, 6);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_failed_insert_rolls_back_every_table() {
    let ctx = TestContext::start().await;

    // Postgres rejects NUL in text, which only the insert itself reports
    let mut fixtures = Fixtures::embedded().unwrap();
    fixtures.customers[0].name = "Amy\0Burns".to_owned();
    assert!(fixtures.validate().is_ok());

    let result = reseed(&ctx.pool, &fixtures, NonZeroUsize::MIN).await;

    assert!(result.is_err());
    // Users are inserted before customers; the rollback removes them too
    assert_eq!(ctx.count("users").await, 0);
    assert_eq!(ctx.count("customers").await, 0);
    assert_eq!(ctx.count("invoices").await, 0);
    assert_eq!(ctx.count("revenue").await, 0);
}
