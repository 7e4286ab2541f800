//! Notification service for queueing email jobs.

use crate::error::{NotificationError, NotificationResult};
use crate::models::EmailJob;
use core_config::{env_or_default, ConfigError, FromEnv};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Configuration for the notification service.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Recipient of admin notifications.
    pub admin_email: String,
}

impl FromEnv for NotificationConfig {
    /// `ADMIN_EMAIL`, defaulting to a local mailbox for development.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            admin_email: env_or_default("ADMIN_EMAIL", "admin@localhost"),
        })
    }
}

/// Service for queueing email notifications.
///
/// Sends jobs into an in-process channel drained by
/// [`run_worker`](crate::worker::run_worker). Enqueueing is synchronous and
/// cheap; callers treat a failure as log-and-continue, never as a request
/// error.
#[derive(Clone)]
pub struct NotificationService {
    tx: mpsc::UnboundedSender<EmailJob>,
    config: NotificationConfig,
}

impl NotificationService {
    /// Create a new service, returning it and the receiver end of the queue.
    ///
    /// Hand the receiver to [`run_worker`](crate::worker::run_worker).
    pub fn new(config: NotificationConfig) -> (Self, mpsc::UnboundedReceiver<EmailJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, config }, rx)
    }

    /// Queue a job for delivery by the background worker.
    fn queue_job(&self, job: EmailJob) -> NotificationResult<Uuid> {
        let job_id = job.id;
        let email_type = job.email_type;

        self.tx
            .send(job)
            .map_err(|_| NotificationError::QueueClosed)?;

        debug!(job_id = %job_id, email_type = %email_type, "Queued email job");
        Ok(job_id)
    }

    /// Queue the admin notification for a newly added sweet.
    pub fn queue_sweet_added(
        &self,
        sweet_name: &str,
        sweet_category: &str,
    ) -> NotificationResult<Uuid> {
        self.queue_job(EmailJob::sweet_added(
            &self.config.admin_email,
            sweet_name,
            sweet_category,
        ))
    }
}
