//! Database seed route.
//!
//! `GET /seed` drops every dashboard table and reloads the fixture data. It
//! answers in JSON and is disabled unless `DASHBOARD_SEED_ENABLED` is set.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::config::token_matches;
use crate::services::reseed;
use crate::state::AppState;

/// Success message returned after a complete reseed.
pub const SEEDED_MESSAGE: &str = "Database seeded successfully";

/// JSON body of every seed response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SeedResponse {
    Ok { message: &'static str },
    Err { error: String },
}

impl SeedResponse {
    fn error(status: StatusCode, error: impl Into<String>) -> Response {
        (status, Json(Self::Err { error: error.into() })).into_response()
    }
}

/// Drop, recreate and reseed every table.
#[instrument(skip_all)]
pub async fn seed(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let config = &state.config().seed;

    if !config.enabled {
        warn!("Seed requested while disabled");
        return SeedResponse::error(StatusCode::FORBIDDEN, "seeding is disabled");
    }

    if let Some(expected) = &config.token {
        let authorized = bearer_token(&headers).is_some_and(|t| token_matches(expected, t));
        if !authorized {
            warn!("Seed requested without a valid token");
            return SeedResponse::error(StatusCode::UNAUTHORIZED, "invalid or missing seed token");
        }
    }

    let result = reseed(state.pool(), state.fixtures(), config.hash_concurrency).await;

    // The tables may already have been dropped even when reseeding failed
    state.cache().invalidate_all().await;

    match result {
        Ok(report) => {
            info!(?report, "Seed complete");
            (StatusCode::OK, Json(SeedResponse::Ok { message: SEEDED_MESSAGE })).into_response()
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            error!(error = %e, sentry_event_id = %event_id, "Seed failed");
            SeedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// The token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
