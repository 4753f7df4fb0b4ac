//! Health check endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    mongodb: bool,
    response_time_ms: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Liveness probe: answers as long as the process serves requests.
async fn heartbeat() -> &'static str {
    "ok"
}

/// Readiness probe: verifies the MongoDB connection.
async fn readiness_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let status = database::mongodb::check_health_detailed(&state.mongo_client).await;

    Json(ReadyResponse {
        status: if status.healthy { "ready" } else { "unhealthy" }.to_string(),
        mongodb: status.healthy,
        response_time_ms: status.response_time_ms,
    })
}
