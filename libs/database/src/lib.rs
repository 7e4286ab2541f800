//! Document-store connectivity for the inventory services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health check and retry
//! - `config` - environment loading via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! let client = database::mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("sweetshop");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
