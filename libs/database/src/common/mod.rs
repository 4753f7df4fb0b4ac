//! Utilities shared by the connection machinery

pub mod retry;

pub use retry::{RetryConfig, retry, retry_with_backoff};
