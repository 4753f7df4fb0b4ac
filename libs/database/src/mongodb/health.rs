use mongodb::Client;
use mongodb::bson::doc;
use std::time::Instant;

/// Health check outcome for MongoDB.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the server answered
    pub healthy: bool,
    /// Error details when it did not
    pub message: Option<String>,
    /// Round-trip time in milliseconds
    pub response_time_ms: u64,
}

/// Ping the server. `true` when it answers.
pub async fn check_health(client: &Client) -> bool {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .is_ok()
}

/// Ping the server and report latency and error details.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match client.database("admin").run_command(doc! { "ping": 1 }).await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
