//! Device routes
//!
//! Wires the devices domain to HTTP routes.

use axum::Router;
use domain_devices::{handlers, DeviceService, MongoDeviceRepository};
use mongodb::Database;

use crate::state::AppState;

/// Create the secondary indexes the device collection relies on.
pub async fn init_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    MongoDeviceRepository::new(db).ensure_indexes().await
}

/// Create the device router
pub fn router(state: &AppState) -> Router {
    let repository = MongoDeviceRepository::new(&state.db);
    let service = DeviceService::new(repository);

    handlers::router(service)
}
