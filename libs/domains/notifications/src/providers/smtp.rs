//! SMTP delivery via lettre.

use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use core_config::{env_or_default, env_parse, ConfigError, FromEnv};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

/// SMTP server settings.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Sender identity.
    pub from_email: String,
    pub from_name: String,
    /// Credentials; both unset for dev relays like Mailpit.
    pub username: Option<String>,
    pub password: Option<String>,
    /// STARTTLS toward the relay; off for local dev servers.
    pub use_tls: bool,
}

impl SmtpConfig {
    pub fn new(host: String, port: u16, from_email: String, from_name: String) -> Self {
        Self {
            host,
            port,
            from_email,
            from_name,
            username: None,
            password: None,
            use_tls: false,
        }
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }
}

// Keep the password out of debug output and logs.
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

impl FromEnv for SmtpConfig {
    /// Defaults target a local Mailpit/MailHog listener on port 1025 with
    /// no TLS and no credentials.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("SMTP_HOST", "localhost"),
            port: env_parse("SMTP_PORT", 1025)?,
            from_email: env_or_default("SMTP_FROM_EMAIL", "noreply@localhost"),
            from_name: env_or_default("SMTP_FROM_NAME", "Sweet Shop"),
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            use_tls: env_parse("SMTP_USE_TLS", false)?,
        })
    }
}

pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpProvider {
    pub fn new(config: SmtpConfig) -> NotificationResult<Self> {
        let from_address: Address = config.from_email.parse().map_err(|e| {
            NotificationError::InvalidAddress(format!("Invalid from address: {}", e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), from_address);

        Ok(Self {
            transport: build_transport(&config)?,
            from,
            host: config.host,
        })
    }

    pub fn from_env() -> NotificationResult<Self> {
        let config = SmtpConfig::from_env()
            .map_err(|e| NotificationError::ProviderError(e.to_string()))?;
        Self::new(config)
    }

    fn build_message(&self, email: &EmailContent) -> NotificationResult<Message> {
        let to_address: Address = email.to_email.parse().map_err(|e| {
            NotificationError::InvalidAddress(format!("Invalid to address: {}", e))
        })?;
        let to_name = (!email.to_name.is_empty()).then(|| email.to_name.clone());

        Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(to_name, to_address))
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| NotificationError::ProviderError(format!("Failed to build email: {}", e)))
    }
}

fn build_transport(
    config: &SmtpConfig,
) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
    let mut builder = if config.use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| {
                NotificationError::ProviderError(format!("Failed to create SMTP relay: {}", e))
            })?
            .port(config.port)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
    };

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(builder.build())
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        debug!(to = %email.to_email, subject = %email.subject, host = %self.host, "Sending email");

        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::ProviderError(format!("SMTP send failed: {}", e)))?;

        let message_id = response.message().next().map(str::to_string);
        info!(to = %email.to_email, message_id = ?message_id, "Email sent");

        Ok(SentEmail { message_id })
    }

    fn name(&self) -> &'static str {
        "SMTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> SmtpConfig {
        SmtpConfig::new(
            "localhost".to_string(),
            1025,
            "noreply@localhost".to_string(),
            "Sweet Shop".to_string(),
        )
    }

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("SMTP_HOST", None::<&str>),
                ("SMTP_PORT", None),
                ("SMTP_USE_TLS", None),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 1025);
                assert!(!config.use_tls);
                assert!(config.username.is_none());
            },
        );
    }

    #[test]
    fn test_config_builders() {
        let config = local_config()
            .with_tls(true)
            .with_credentials("user".to_string(), "pass".to_string());

        assert!(config.use_tls);
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("pass"));
    }

    #[test]
    fn test_new_rejects_bad_from_address() {
        let mut config = local_config();
        config.from_email = "not an address".to_string();
        assert!(SmtpProvider::new(config).is_err());
    }

    #[test]
    fn test_build_message_plain_text() {
        let provider = SmtpProvider::new(local_config()).unwrap();

        let content = EmailContent {
            to_email: "admin@example.com".to_string(),
            to_name: "Admin".to_string(),
            subject: "New Sweet Added to Inventory".to_string(),
            body: "Name: Kaju Katli".to_string(),
        };

        assert!(provider.build_message(&content).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let provider = SmtpProvider::new(local_config()).unwrap();

        let content = EmailContent {
            to_email: "not an address".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            provider.build_message(&content).unwrap_err(),
            NotificationError::InvalidAddress(_)
        ));
    }
}
