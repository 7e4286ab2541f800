//! Email delivery providers.
//!
//! [`EmailProvider`] is the seam between the queue worker and the actual
//! delivery mechanism, so tests can drive the worker with an in-memory
//! provider.

mod smtp;

pub use smtp::{SmtpConfig, SmtpProvider};

use crate::error::NotificationResult;
use async_trait::async_trait;

/// Outcome of an accepted send.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Provider-assigned message id, when one is reported.
    pub message_id: Option<String>,
}

/// A plain-text email ready for delivery.
#[derive(Debug, Clone, Default)]
pub struct EmailContent {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}
