//! Devices Domain
//!
//! Device registry: stores and retrieves device records (identifier, name,
//! brand) behind a MongoDB-backed repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, wire validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← orchestration, sentinel translation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, brand enum, DTOs
//! └─────────────┘
//! ```
//!
//! Failures at every layer share one taxonomy ([`error::DeviceError`]) with
//! stable numeric codes, so callers can match on codes rather than message
//! text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_devices::{handlers, mongodb::MongoDeviceRepository, service::DeviceService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("device");
//!
//! let repository = MongoDeviceRepository::new(&db);
//! repository.ensure_indexes().await?;
//!
//! let service = DeviceService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{DeviceError, DeviceResult, ErrorBody};
pub use handlers::ApiDoc;
pub use models::{
    Brand, CreateDeviceRequest, CreatedDeviceResponse, Device, DeviceDto, SearchDevicesQuery,
    UpdateDeviceBrandRequest, UpdateDeviceNameRequest, UpdateDeviceRequest,
};
pub use mongodb::MongoDeviceRepository;
pub use repository::DeviceRepository;
pub use service::DeviceService;
