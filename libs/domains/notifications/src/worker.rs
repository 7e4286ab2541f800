//! Background worker draining the email job queue.

use crate::models::EmailJob;
use crate::providers::EmailProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Delay between delivery attempts for the same job.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Run the notification worker until the queue closes.
///
/// Each job is attempted up to [`EmailJob::max_retries`] times; exhausted
/// jobs are logged and dropped. The loop ends when every sender handle has
/// been dropped, which happens naturally at shutdown.
pub async fn run_worker<P: EmailProvider + ?Sized>(
    mut rx: mpsc::UnboundedReceiver<EmailJob>,
    provider: Arc<P>,
) {
    info!(provider = provider.name(), "Starting notification worker");

    while let Some(job) = rx.recv().await {
        deliver(job, provider.as_ref()).await;
    }

    info!("Notification queue closed, worker stopping");
}

async fn deliver<P: EmailProvider + ?Sized>(mut job: EmailJob, provider: &P) {
    let max_retries = job.max_retries();

    loop {
        match provider.send(&job.content()).await {
            Ok(sent) => {
                info!(
                    job_id = %job.id,
                    email_type = %job.email_type,
                    message_id = ?sent.message_id,
                    "Email delivered"
                );
                return;
            }
            Err(e) if job.retry_count + 1 < max_retries => {
                warn!(
                    job_id = %job.id,
                    retry_count = job.retry_count,
                    error = %e,
                    "Email delivery failed, retrying"
                );
                job = job.with_retry();
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                error!(
                    job_id = %job.id,
                    email_type = %job.email_type,
                    to = %job.to_email,
                    error = %e,
                    "Email delivery failed after {} attempts, dropping job",
                    max_retries
                );
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NotificationError, NotificationResult};
    use crate::models::EmailType;
    use crate::providers::{EmailContent, SentEmail};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider that fails the first `failures` sends, then succeeds.
    struct FlakyProvider {
        failures: u32,
        attempts: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                attempts: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl EmailProvider for FlakyProvider {
        async fn send(&self, _email: &EmailContent) -> NotificationResult<SentEmail> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                Err(NotificationError::ProviderError("smtp down".to_string()))
            } else {
                Ok(SentEmail {
                    message_id: Some("msg-1".to_string()),
                })
            }
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn test_job() -> EmailJob {
        EmailJob::new(
            EmailType::SweetAdded,
            "admin@example.com".to_string(),
            "Admin".to_string(),
            "New Sweet Added to Inventory".to_string(),
            "Name: Barfi".to_string(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_on_first_attempt() {
        let provider = Arc::new(FlakyProvider::new(0));
        deliver(test_job(), provider.as_ref()).await;
        assert_eq!(provider.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_failure() {
        let provider = Arc::new(FlakyProvider::new(2));
        deliver(test_job(), provider.as_ref()).await;
        assert_eq!(provider.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drops_job_after_max_retries() {
        // Always failing: attempts stop at max_retries, the job is dropped.
        let provider = Arc::new(FlakyProvider::new(u32::MAX));
        let job = test_job();
        let max = job.max_retries();

        deliver(job, provider.as_ref()).await;
        assert_eq!(provider.attempts.load(Ordering::SeqCst), max);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_drains_queue_then_stops() {
        let provider = Arc::new(FlakyProvider::new(0));
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(test_job()).unwrap();
        tx.send(test_job()).unwrap();
        drop(tx);

        run_worker(rx, Arc::clone(&provider)).await;
        assert_eq!(provider.attempts.load(Ordering::SeqCst), 2);
    }
}
