//! Static API key authentication middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{env_required, ConfigError, FromEnv};
use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "API-Key";

/// Configuration for API key authentication.
#[derive(Clone)]
pub struct ApiKeyConfig {
    secret: String,
}

impl ApiKeyConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check a presented key against the configured secret.
    ///
    /// Both sides are hashed before comparison so the check does not leak
    /// where the inputs first differ.
    pub fn verify(&self, presented: &str) -> bool {
        Sha256::digest(presented.as_bytes()) == Sha256::digest(self.secret.as_bytes())
    }
}

// Keep the secret out of debug output and logs.
impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("secret", &"***")
            .finish()
    }
}

impl FromEnv for ApiKeyConfig {
    /// Reads the shared secret from the `API_KEY` environment variable.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("API_KEY")?))
    }
}

/// API key authentication middleware.
///
/// Rejects requests whose `API-Key` header is absent or does not match the
/// configured secret with a 401 `{status:false, detail:"Invalid API-Key"}`.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use axum_helpers::{api_key_auth_middleware, ApiKeyConfig};
///
/// let protected = Router::new()
///     .nest("/sweets", sweets_router)
///     .layer(middleware::from_fn_with_state(
///         ApiKeyConfig::new("secret"),
///         api_key_auth_middleware,
///     ));
/// ```
pub async fn api_key_auth_middleware(
    State(config): State<ApiKeyConfig>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if config.verify(key) => Ok(next.run(request).await),
        Some(_) => {
            tracing::info!("Rejected request with mismatched API key");
            Err(AppError::Unauthorized("Invalid API-Key".to_string()).into_response())
        }
        None => {
            tracing::debug!("Rejected request with no API key header");
            Err(AppError::Unauthorized("Invalid API-Key".to_string()).into_response())
        }
    }
}
