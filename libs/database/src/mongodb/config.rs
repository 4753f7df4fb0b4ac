#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// MongoDB connection settings.
///
/// Construct directly for tests and tools, or load from environment
/// variables with the `config` feature. The driver timeouts configured here
/// are what bound every store call a repository makes over this connection.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection URL: `mongodb://[username:password@]host[:port][/?options]`
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name reported in server logs
    pub app_name: Option<String>,

    /// Connection pool bounds
    pub max_pool_size: u32,
    pub min_pool_size: u32,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// A config pointing at `url` with the default database.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// A config pointing at `url` with a specific database.
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name reported in server logs.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Load MongoConfig from environment variables.
///
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE or MONGO_DATABASE".to_string())
            })?;

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size: parse_env("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: parse_env("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: parse_env("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: parse_env("MONGODB_SERVER_SELECTION_TIMEOUT_SECS", 30)?,
        })
    }
}

#[cfg(feature = "config")]
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_database_and_pool() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "default");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
    }

    #[test]
    fn with_database_overrides_the_database() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "device");
        assert_eq!(config.database(), "device");
    }

    #[test]
    fn with_app_name_sets_the_server_log_name() {
        let config = MongoConfig::new("mongodb://localhost:27017").with_app_name("device-api");
        assert_eq!(config.app_name.as_deref(), Some("device-api"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_reads_primary_variables() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("device")),
                ("MONGODB_MAX_POOL_SIZE", Some("20")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "device");
                assert_eq!(config.max_pool_size, 20);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_falls_back_to_short_variable_names() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_requires_a_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("device")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_rejects_unparseable_numbers() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("device")),
                ("MONGODB_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }
}
