//! Health check endpoints

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{health_router, run_health_checks, HealthCheckFuture};
use database::postgres::check_health;

use crate::state::AppState;

/// Readiness: 200 while the database answers a ping, 503 otherwise
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

/// `/health` (liveness) and `/ready` (readiness)
pub fn router(state: AppState) -> Router {
    health_router(state.config.app).merge(
        Router::new()
            .route("/ready", get(ready))
            .with_state(state),
    )
}
