//! Sweets domain wiring.

use axum::Router;
use domain_sweets::{handlers, MongoSweetRepository, SweetService};
use mongodb::Database;

use crate::state::AppState;

/// Create the indexes the sweets collection relies on.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoSweetRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create sweet indexes: {}", e))
}

/// The inventory router, backed by MongoDB with the admin notification
/// queue attached.
pub fn router(state: &AppState) -> Router {
    let repository = MongoSweetRepository::new(state.db.clone());
    let service = SweetService::new(repository).with_notifications(state.notifications.clone());
    handlers::router(service)
}
