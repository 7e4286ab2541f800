use domain_notifications::NotificationService;
use mongodb::{Client, Database};

/// Shared application state, cloned per handler (cheap Arc clones under
/// the hood).
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Driver client, kept for the readiness probe and shutdown.
    pub mongo_client: Client,
    pub db: Database,
    /// Sender handle for the admin email queue.
    pub notifications: NotificationService,
}
