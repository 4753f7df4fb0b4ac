use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::DeviceResult;
use crate::models::Device;

/// Persistence contract for devices.
///
/// Implementations own all interaction with the backing store: existence
/// checks, partial updates, and translation of store-level misses into
/// taxonomy errors. Brand strings are validated here, on both the filter and
/// the write path, so no unrecognized value ever reaches the store even if a
/// caller skipped its own checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Insert a new device. Stamps `created_at` (whole seconds) before the
    /// insert and returns the device with the store-assigned identifier.
    async fn create(&self, device: Device) -> DeviceResult<Device>;

    /// Fetch a device by identifier. A miss at the lookup layer yields an
    /// undecorated not-found error; a store failure yields the decorated
    /// variant carrying the store's message.
    async fn by_id(&self, id: ObjectId) -> DeviceResult<Device>;

    /// All devices, empty when none exist.
    async fn list(&self) -> DeviceResult<Vec<Device>>;

    /// Devices matching `brand` exactly. The brand is checked against the
    /// enumeration before the store is touched.
    async fn list_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>>;

    /// Replace `name` and `brand` and refresh `updated_at`. The target must
    /// already exist; `created_at` is never touched. Returns the input
    /// device, not a re-fetched copy.
    async fn update(&self, device: Device) -> DeviceResult<Device>;

    /// Replace only `name`, refreshing `updated_at`.
    async fn update_name(&self, id: ObjectId, name: &str) -> DeviceResult<()>;

    /// Replace only `brand`, refreshing `updated_at`. The brand is checked
    /// against the enumeration before the store is touched.
    async fn update_brand(&self, id: ObjectId, brand: &str) -> DeviceResult<()>;

    /// Remove the device. Removing an unknown identifier is an error.
    async fn delete(&self, id: ObjectId) -> DeviceResult<()>;
}
