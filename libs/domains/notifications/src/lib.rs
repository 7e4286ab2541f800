//! Notifications Domain
//!
//! Fire-and-forget admin email notifications. Operations enqueue
//! [`EmailJob`]s into an in-process async queue; a background worker drains
//! the queue and delivers over SMTP. Enqueue and delivery failures are
//! logged and never propagate to the caller.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_notifications::{
//!     providers::SmtpProvider, run_worker, NotificationConfig, NotificationService,
//! };
//! use core_config::FromEnv;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (service, rx) = NotificationService::new(NotificationConfig::from_env()?);
//! let provider = Arc::new(SmtpProvider::from_env()?);
//! tokio::spawn(run_worker(rx, provider));
//!
//! // Later, from a request handler path:
//! if let Err(e) = service.queue_sweet_added("Kaju Katli", "Nut-based") {
//!     tracing::warn!("Failed to queue admin notification: {}", e);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod providers;
pub mod service;
pub mod worker;

pub use error::{NotificationError, NotificationResult};
pub use models::{EmailJob, EmailType};
pub use providers::{EmailContent, EmailProvider, SentEmail};
pub use service::{NotificationConfig, NotificationService};
pub use worker::run_worker;
