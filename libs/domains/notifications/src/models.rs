//! Email job model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::providers::EmailContent;

/// Types of emails the service can send.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    /// Admin notification sent when a new sweet enters the inventory.
    SweetAdded,
}

impl std::fmt::Display for EmailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailType::SweetAdded => f.write_str("sweet_added"),
        }
    }
}

/// An email queued for the background worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    pub id: Uuid,
    pub email_type: EmailType,
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Delivery attempts so far.
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
}

impl EmailJob {
    pub fn new(
        email_type: EmailType,
        to_email: String,
        to_name: String,
        subject: String,
        body: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email_type,
            to_email,
            to_name,
            subject,
            body,
            retry_count: 0,
            created_at: Utc::now(),
        }
    }

    /// The admin notification for a newly added sweet.
    pub fn sweet_added(admin_email: &str, sweet_name: &str, sweet_category: &str) -> Self {
        let body = format!(
            "Admin,\n\n\
             A new sweet has been added to the inventory.\n\n\
             Name: {}\n\
             Category: {}\n\n\
             Please review the sweet details.\n\n\
             Regards,\n\
             Sweet Shop Management System\n",
            sweet_name, sweet_category
        );

        Self::new(
            EmailType::SweetAdded,
            admin_email.to_string(),
            "Admin".to_string(),
            "New Sweet Added to Inventory".to_string(),
            body,
        )
    }

    /// Copy of this job with the retry counter bumped.
    pub fn with_retry(&self) -> Self {
        Self {
            retry_count: self.retry_count + 1,
            ..self.clone()
        }
    }

    /// Delivery attempts before a job is dropped.
    pub fn max_retries(&self) -> u32 {
        3
    }

    /// Render as provider-ready content.
    pub fn content(&self) -> EmailContent {
        EmailContent {
            to_email: self.to_email.clone(),
            to_name: self.to_name.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}
