//! Authentication for the API surface.
//!
//! The service uses a single static shared secret presented in the
//! `API-Key` header. See [`api_key`] for the middleware and config.

pub mod api_key;

pub use api_key::{api_key_auth_middleware, ApiKeyConfig, API_KEY_HEADER};
