//! MongoDB connector and connection utilities
//!
//! Provides configured connection setup (with optional retry and backoff),
//! health checks, and environment-driven configuration for services that
//! persist to MongoDB.
//!
//! # Features
//!
//! - `config` - Loads [`mongodb::MongoConfig`] from environment variables
//!   via `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("device");
//! let collection = db.collection::<Document>("device");
//! ```
//!
//! With configuration and retry:
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::mongodb::{connect_from_config_with_retry, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "device");
//! let retry = RetryConfig::new().with_max_retries(5);
//! let client = connect_from_config_with_retry(&config, Some(retry)).await?;
//! ```

pub mod common;
pub mod mongodb;

// Re-exports for convenience
pub use self::common::{RetryConfig, retry, retry_with_backoff};
pub use self::mongodb::{MongoConfig, MongoError};
