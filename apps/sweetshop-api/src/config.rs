use axum_helpers::ApiKeyConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_notifications::{providers::SmtpConfig, NotificationConfig};

pub use core_config::Environment;

/// Everything the binary needs from the environment, loaded once at
/// startup so a misconfigured deployment fails before binding the port.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub api_key: ApiKeyConfig,
    pub notifications: NotificationConfig,
    pub smtp: SmtpConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            api_key: ApiKeyConfig::from_env()?,
            notifications: NotificationConfig::from_env()?,
            smtp: SmtpConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
