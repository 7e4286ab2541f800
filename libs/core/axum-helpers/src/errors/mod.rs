pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Uniform error envelope.
///
/// Every error response carries a boolean `status` flag (always `false`)
/// mirroring the HTTP outcome, and a human-readable `detail`. Existing API
/// consumers depend on this shape.
///
/// ```json
/// { "status": false, "detail": "Sweet not found" }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for errors
    pub status: bool,
    /// Human-readable error message
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            status: false,
            detail: detail.into(),
        }
    }
}

/// Application error type that renders the uniform envelope.
///
/// Client errors surface their message to the caller; server errors log
/// the original text and respond with a generic detail so internals never
/// leak. Every arm emits its [`ErrorCode`] into the structured logs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match self {
            AppError::JsonExtractorRejection(e) => {
                (e.status(), ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                format!("Validation failed: {}", e).replace('\n', "; "),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg)
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            // Duplicate names surface as 400 to match the contract existing
            // consumers were built against, not 409.
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Conflict, msg),
            AppError::InsufficientStock(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InsufficientStock, msg)
            }
            AppError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, msg)
            }
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                msg,
            ),
        };

        let detail = if status.is_server_error() {
            tracing::error!(error_code = code.code(), status = %status, "{}", detail);
            code.default_message().to_string()
        } else {
            tracing::info!(error_code = code.code(), status = %status, "{}", detail);
            detail
        };

        (status, Json(ErrorResponse::new(detail))).into_response()
    }
}
