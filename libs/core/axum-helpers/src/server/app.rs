use super::shutdown::{shutdown_signal, ShutdownCoordinator};
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use axum::http::HeaderValue;
use axum::{middleware, Router};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};
use utoipa::OpenApi;

/// Assemble the service router: OpenAPI docs, the API routes nested under
/// `/api`, and the shared middleware stack (trace, security headers, CORS,
/// compression). Unmatched paths get the JSON 404 fallback.
///
/// Health endpoints are the app's responsibility; merge them after this so
/// they stay outside `/api`.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_from_env()?)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve the router, stopping on SIGTERM/SIGINT with no further cleanup.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Serve the router with coordinated shutdown.
///
/// On SIGTERM/SIGINT the server stops accepting connections and `cleanup`
/// runs with `shutdown_timeout` to finish; a cleanup that overruns is
/// abandoned so the process still exits.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let cleanup_task = tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            coordinator.wait_for_shutdown().await;

            info!("Running shutdown cleanup (timeout: {:?})", shutdown_timeout);
            match tokio::time::timeout(shutdown_timeout, cleanup).await {
                Ok(()) => info!("Cleanup finished"),
                Err(_) => warn!("Cleanup exceeded {:?}, abandoning it", shutdown_timeout),
            }
        }
    });

    let signal = {
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for_signal().await }
    };

    let result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(signal)
        .await;

    // Ensure cleanup also runs when serve() returns without a signal.
    coordinator.shutdown();
    cleanup_task.await.ok();

    result
}

/// CORS policy from `CORS_ALLOWED_ORIGIN` (comma-separated origins).
///
/// Unset means permissive, which suits local development and
/// server-to-server deployments with no browser frontend. A set but
/// malformed value is a startup error rather than a silent fallback.
fn cors_from_env() -> io::Result<CorsLayer> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        info!("CORS_ALLOWED_ORIGIN not set, using permissive CORS");
        return Ok(create_permissive_cors_layer());
    };

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS restricted to: {}", raw);
    Ok(create_cors_layer(origins))
}
