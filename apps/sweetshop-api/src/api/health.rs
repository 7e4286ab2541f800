//! Readiness probe.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    mongodb: bool,
    latency_ms: u64,
}

/// Unauthenticated `/ready` router, merged at the root alongside `/health`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 while MongoDB answers pings, 503 otherwise.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = database::mongodb::check_health(&state.mongo_client).await;

    if let Some(ref error) = health.error {
        warn!(error = %error, "Readiness probe failed");
    }

    let status = if health.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if health.healthy { "ready" } else { "unhealthy" },
            mongodb: health.healthy,
            latency_ms: health.latency_ms,
        }),
    )
}
