//! HTTP route wiring for the binary.

pub mod health;
pub mod sweets;

use axum::{middleware, Router};
use axum_helpers::api_key_auth_middleware;

use crate::state::AppState;

/// The routes nested under `/api` by `create_router`. Every inventory
/// endpoint sits behind the shared API key; health and docs stay open.
pub fn routes(state: &AppState) -> Router {
    sweets::router(state).layer(middleware::from_fn_with_state(
        state.config.api_key.clone(),
        api_key_auth_middleware,
    ))
}
