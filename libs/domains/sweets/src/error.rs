use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SweetError {
    #[error("Sweet not found: {0}")]
    NotFound(Uuid),

    #[error("Sweet with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Database error: {0}")]
    Database(String),
}

pub type SweetResult<T> = Result<T, SweetError>;

/// Convert SweetError to AppError for standardized error responses
impl From<SweetError> for AppError {
    fn from(err: SweetError) -> Self {
        match err {
            SweetError::NotFound(_) => AppError::NotFound("Sweet not found".to_string()),
            SweetError::DuplicateName(_) => {
                AppError::Conflict("Sweet with this name already exists".to_string())
            }
            SweetError::Validation(msg) => AppError::BadRequest(msg),
            SweetError::InvalidQuantity => {
                AppError::BadRequest("Quantity must be greater than zero".to_string())
            }
            SweetError::InsufficientStock { .. } => {
                AppError::InsufficientStock("Not enough quantity available".to_string())
            }
            SweetError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SweetError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for SweetError {
    fn from(err: mongodb::error::Error) -> Self {
        SweetError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = SweetError::NotFound(Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_name_maps_to_400() {
        let response = SweetError::DuplicateName("Kaju Katli".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_insufficient_stock_maps_to_400() {
        let response = SweetError::InsufficientStock {
            available: 3,
            requested: 5,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let response = SweetError::Database("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
