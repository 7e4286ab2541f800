use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_notifications::{providers::SmtpProvider, run_worker, NotificationService};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(database = config.mongodb.database(), "MongoDB ready");

    api::sweets::init_indexes(&db).await?;

    // The admin email worker runs for the life of the process; its queue
    // closes when the service handle in the state drops at shutdown.
    let (notifications, notification_rx) = NotificationService::new(config.notifications.clone());
    tokio::spawn(run_worker(
        notification_rx,
        Arc::new(SmtpProvider::new(config.smtp.clone())?),
    ));

    let state = AppState {
        config,
        mongo_client,
        db,
        notifications,
    };

    // Inventory routes (API-key guarded, nested under /api) plus the open
    // liveness and readiness endpoints.
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state)).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    let server_config = state.config.server.clone();
    info!(address = %server_config.address(), "Starting Sweet Shop API");

    create_production_app(app, &server_config, SHUTDOWN_TIMEOUT, async move {
        info!("Closing MongoDB connections");
        drop(state);
    })
    .await?;

    info!("Sweet Shop API shutdown complete");
    Ok(())
}
