//! Integer error codes emitted into structured logs.
//!
//! Codes are grouped by range: 1000-1999 client errors, 2000-2999 store
//! errors. Each code also carries a stable identifier for log search and a
//! default user-facing message.

/// Standardized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request validation failed
    ValidationError,
    /// Invalid identifier format in a path or query parameter
    InvalidId,
    /// JSON extraction from the request body failed
    JsonExtraction,
    /// Requested resource was not found
    NotFound,
    /// Authentication credentials are missing or invalid
    Unauthorized,
    /// Request conflicts with current resource state (e.g., duplicate name)
    Conflict,
    /// Requested more stock than is available
    InsufficientStock,
    /// An unexpected internal server error occurred
    InternalError,
    /// Service is temporarily unavailable
    ServiceUnavailable,
    /// Document store connection or query error
    StoreError,
}

impl ErrorCode {
    const fn descriptor(self) -> (i32, &'static str, &'static str) {
        match self {
            Self::ValidationError => (1001, "VALIDATION_ERROR", "Request validation failed"),
            Self::InvalidId => (1002, "INVALID_ID", "Invalid ID format"),
            Self::JsonExtraction => (1003, "JSON_EXTRACTION", "Failed to parse request body"),
            Self::NotFound => (1004, "NOT_FOUND", "Resource not found"),
            Self::InternalError => (1005, "INTERNAL_ERROR", "An internal server error occurred"),
            Self::Unauthorized => (1006, "UNAUTHORIZED", "Authentication required"),
            Self::Conflict => (1008, "CONFLICT", "Resource already exists"),
            Self::InsufficientStock => {
                (1010, "INSUFFICIENT_STOCK", "Not enough quantity available")
            }
            Self::ServiceUnavailable => {
                (1011, "SERVICE_UNAVAILABLE", "Service is temporarily unavailable")
            }
            Self::StoreError => (2001, "STORE_ERROR", "Database error occurred"),
        }
    }

    /// Integer code for monitoring queries.
    pub const fn code(self) -> i32 {
        self.descriptor().0
    }

    /// Stable identifier for log search.
    pub const fn as_str(self) -> &'static str {
        self.descriptor().1
    }

    /// Default user-facing message.
    pub const fn default_message(self) -> &'static str {
        self.descriptor().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_fields_agree() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::Unauthorized.code(), 1006);
        assert_eq!(ErrorCode::StoreError.code(), 2001);
    }

    #[test]
    fn test_client_and_store_ranges() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::InvalidId,
            ErrorCode::JsonExtraction,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
            ErrorCode::Conflict,
            ErrorCode::InsufficientStock,
        ] {
            assert!((1000..2000).contains(&code.code()));
        }
        assert!((2000..3000).contains(&ErrorCode::StoreError.code()));
    }

    #[test]
    fn test_display_uses_identifier() {
        assert_eq!(
            ErrorCode::InsufficientStock.to_string(),
            "INSUFFICIENT_STOCK"
        );
    }
}
