//! HTTP API routes for the device registry.

pub mod devices;
pub mod health;

use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/device", devices::router(state))
        .merge(health::router(state.clone()))
        .route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Route-not-found (404) response model.
#[derive(Serialize)]
pub struct RouteNotFoundResponse {
    pub error: String,
    pub path: String,
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<RouteNotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            error: "resource not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}
