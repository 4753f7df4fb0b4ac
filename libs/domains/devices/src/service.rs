//! Device service - the single entry point the HTTP layer calls into.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use crate::error::{DeviceError, DeviceResult};
use crate::models::Device;
use crate::repository::DeviceRepository;

const DEVICE: &str = "device";

/// Orchestrates repository calls on behalf of external callers.
///
/// The repository already classifies store failures, so this layer is
/// deliberately thin: it delegates and returns results verbatim, with one
/// exception. Should a lookup surface the store's raw empty-result sentinel
/// instead of an already-structured not-found error, [`Self::get_device`]
/// converts it into a decorated not-found so that every error a caller sees
/// is taxonomy-shaped.
pub struct DeviceService<R: DeviceRepository> {
    repository: Arc<R>,
}

impl<R: DeviceRepository> DeviceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: Device) -> DeviceResult<Device> {
        self.repository.create(device).await
    }

    #[instrument(skip(self))]
    pub async fn get_device(&self, id: ObjectId) -> DeviceResult<Device> {
        match self.repository.by_id(id).await {
            Err(DeviceError::NoDocuments) => Err(DeviceError::could_not_find_with(
                DEVICE,
                &id.to_hex(),
                DeviceError::NoDocuments,
            )),
            other => other,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_devices(&self) -> DeviceResult<Vec<Device>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_devices_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>> {
        self.repository.list_by_brand(brand).await
    }

    #[instrument(skip(self, device), fields(device_id = %device.hex_id()))]
    pub async fn update_device(&self, device: Device) -> DeviceResult<Device> {
        self.repository.update(device).await
    }

    #[instrument(skip(self, name))]
    pub async fn update_device_name(&self, id: ObjectId, name: &str) -> DeviceResult<()> {
        self.repository.update_name(id, name).await
    }

    #[instrument(skip(self))]
    pub async fn update_device_brand(&self, id: ObjectId, brand: &str) -> DeviceResult<()> {
        self.repository.update_brand(id, brand).await
    }

    #[instrument(skip(self))]
    pub async fn delete_device(&self, id: ObjectId) -> DeviceResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: DeviceRepository> Clone for DeviceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
