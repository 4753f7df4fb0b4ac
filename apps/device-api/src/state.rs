//! Shared application state passed to request handlers.

use mongodb::{Client, Database};

/// Cloned per handler; the client shares one underlying connection pool, so
/// clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
