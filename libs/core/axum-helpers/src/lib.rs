//! Shared HTTP plumbing for the inventory services.
//!
//! - [`auth`]: static API key middleware
//! - [`server`]: router assembly, health endpoint, graceful shutdown
//! - [`http`]: CORS and security header layers
//! - [`errors`]: the uniform `{status, detail}` error envelope
//! - [`extractors`]: UUID path and validated JSON extractors
//!
//! A service binary wires these together:
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &server_config, timeout, cleanup).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{api_key_auth_middleware, ApiKeyConfig, API_KEY_HEADER};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{
    create_app, create_production_app, create_router, health_router, shutdown_signal,
    HealthResponse, ShutdownCoordinator,
};
