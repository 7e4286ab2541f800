use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification queue is closed")]
    QueueClosed,

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

pub type NotificationResult<T> = Result<T, NotificationError>;
