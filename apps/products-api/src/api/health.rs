//! Greeting and readiness endpoints
//!
//! `/health` comes from `axum_helpers::health_router` and is merged in `main`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;
use serde_json::Value;

use crate::state::AppState;

async fn hello() -> &'static str {
    "Hello world!"
}

/// Readiness: 200 when PostgreSQL answers, 503 otherwise.
async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(hello))
        .route("/ready", get(ready))
        .with_state(state)
}
