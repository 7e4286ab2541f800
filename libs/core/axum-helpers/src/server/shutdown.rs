use tokio::signal;
use tokio::sync::watch;
use tracing::info;

/// Coordinates graceful shutdown across the server and background tasks.
///
/// The shutdown state lives in a watch channel: flipping it once wakes the
/// server's shutdown future and every subscribed task at the same time.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    state: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    /// Obtain a receiver that resolves once shutdown begins.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.state.borrow()
    }

    /// Flip the shutdown flag. Only the first call has any effect.
    pub fn shutdown(&self) {
        if !self.state.send_replace(true) {
            info!("Initiating graceful shutdown");
        }
    }

    /// Block until SIGTERM or SIGINT arrives, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        termination_signal().await;
        self.shutdown();
    }

    /// Block until shutdown has been initiated, by signal or by a direct
    /// [`shutdown`](Self::shutdown) call.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.subscribe();
        // Only errors when the sender is gone, at which point the process
        // is tearing down anyway.
        let _ = rx.wait_for(|initiated| *initiated).await;
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when the process receives SIGTERM or SIGINT.
///
/// For servers that don't need coordinated cleanup; pass this straight to
/// axum's `with_graceful_shutdown`.
pub async fn shutdown_signal() {
    termination_signal().await;
}

async fn termination_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
