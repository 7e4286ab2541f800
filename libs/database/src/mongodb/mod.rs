//! MongoDB connector, configuration and health probing.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry, MongoError,
};
pub use health::{check_health, MongoHealth};

// Driver types, re-exported so callers rarely need `mongodb` directly.
pub use mongodb::{Client, Collection, Database};
