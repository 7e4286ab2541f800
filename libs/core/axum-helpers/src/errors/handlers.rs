use axum::{http::StatusCode, response::IntoResponse, Json};

use super::ErrorResponse;

/// JSON 404 for unmatched routes, in the uniform envelope.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("The requested resource was not found")),
    )
}
