//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a MongoDB container and hands
//! out a connected client. Each instance gets its own container, so tests
//! are isolated and can run in parallel.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

const TEST_DATABASE: &str = "device-test";

/// Test MongoDB wrapper that ensures proper cleanup.
///
/// The container is stopped and removed when this struct is dropped, which
/// also invalidates the client. Keep the wrapper alive for as long as the
/// connection is used.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB container and connect to it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::new().await;
    /// let collection = mongo.database().collection::<mongodb::bson::Document>("device");
    /// # }
    /// ```
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get host port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to connect to test MongoDB");

        tracing::info!(port = host_port, "Test MongoDB ready");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// A cloned client handle (shares the underlying connection pool).
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// The default test database.
    pub fn database(&self) -> Database {
        self.client.database(TEST_DATABASE)
    }

    /// A named database, for tests that want extra isolation within one
    /// container.
    pub fn database_named(&self, name: &str) -> Database {
        self.client.database(name)
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
