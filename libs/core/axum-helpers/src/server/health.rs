use axum::{extract::State, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response: 200 with the service identity while the process is
/// up. Store connectivity is the readiness endpoint's concern, not this
/// one's.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// Router exposing `/health`.
///
/// ```ignore
/// let app = router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_identity() {
        let app = AppInfo {
            name: "sweetshop_api",
            version: "0.1.0",
        };

        let Json(body) = health_handler(State(app)).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.name, "sweetshop_api");
        assert_eq!(body.version, "0.1.0");
    }
}
