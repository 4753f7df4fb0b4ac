//! MongoDB implementation of [`DeviceRepository`].

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;

use crate::error::{DeviceError, DeviceResult};
use crate::models::{Brand, Device};
use crate::repository::DeviceRepository;

/// Collection devices are persisted in; also the object name used in error
/// messages.
pub const DEVICE_COLLECTION: &str = "device";

/// Device repository backed by a MongoDB collection.
///
/// Holds an owned collection handle derived from the injected database; the
/// driver's pooling makes clones of the handle cheap and the repository
/// itself stateless.
pub struct MongoDeviceRepository {
    collection: Collection<Device>,
}

impl MongoDeviceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Device>(DEVICE_COLLECTION),
        }
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Device>(collection_name),
        }
    }

    /// Secondary index on `brand`, backing the brand-filtered listing.
    /// Called once at startup; creation is idempotent.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder().keys(doc! { "brand": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    /// The underlying collection, for test setup and advanced operations.
    pub fn collection(&self) -> &Collection<Device> {
        &self.collection
    }

    fn parse_brand(brand: &str) -> DeviceResult<Brand> {
        brand
            .parse()
            .map_err(|_| DeviceError::invalid_parameter("brand", "invalid value"))
    }
}

#[async_trait]
impl DeviceRepository for MongoDeviceRepository {
    #[instrument(skip(self, device), fields(device_name = %device.name))]
    async fn create(&self, mut device: Device) -> DeviceResult<Device> {
        device.created_at = Utc::now().trunc_subsecs(0);

        let result = self
            .collection
            .insert_one(&device)
            .await
            .map_err(|e| DeviceError::create(DEVICE_COLLECTION, e))?;

        device.id = result.inserted_id.as_object_id();
        tracing::info!(device_id = %device.hex_id(), "device created");
        Ok(device)
    }

    #[instrument(skip(self))]
    async fn by_id(&self, id: ObjectId) -> DeviceResult<Device> {
        let device = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| DeviceError::could_not_find_with(DEVICE_COLLECTION, &id.to_hex(), e))?;

        device.ok_or_else(|| DeviceError::could_not_find(DEVICE_COLLECTION, &id.to_hex()))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> DeviceResult<Vec<Device>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| DeviceError::list(DEVICE_COLLECTION, e, &["ALL"]))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| DeviceError::list(DEVICE_COLLECTION, e, &["ALL"]))
    }

    #[instrument(skip(self))]
    async fn list_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>> {
        let brand = Self::parse_brand(brand)?;
        let brand_value = brand.to_string();

        let cursor = self
            .collection
            .find(doc! { "brand": &brand_value })
            .await
            .map_err(|e| DeviceError::list(DEVICE_COLLECTION, e, &["brand", &brand_value]))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| DeviceError::list(DEVICE_COLLECTION, e, &["brand", &brand_value]))
    }

    #[instrument(skip(self, device), fields(device_id = %device.hex_id()))]
    async fn update(&self, device: Device) -> DeviceResult<Device> {
        let id = device
            .id
            .ok_or_else(|| DeviceError::required_parameter("id", "device"))?;
        let now = Utc::now().trunc_subsecs(0);

        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "updatedAt": bson::DateTime::from_chrono(now),
                    "name": device.name.as_str(),
                    "brand": device.brand.to_string(),
                } },
            )
            .await
            .map_err(|e| DeviceError::update(DEVICE_COLLECTION, e))?;

        if result.matched_count == 0 {
            return Err(DeviceError::could_not_find_with(
                DEVICE_COLLECTION,
                &id.to_hex(),
                DeviceError::NoDocuments,
            ));
        }

        tracing::info!(device_id = %id.to_hex(), "device updated");
        Ok(device)
    }

    #[instrument(skip(self, name))]
    async fn update_name(&self, id: ObjectId, name: &str) -> DeviceResult<()> {
        let now = Utc::now().trunc_subsecs(0);

        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "updatedAt": bson::DateTime::from_chrono(now),
                    "name": name,
                } },
            )
            .await
            .map_err(|e| DeviceError::update(DEVICE_COLLECTION, e))?;

        if result.matched_count == 0 {
            return Err(DeviceError::could_not_find_with(
                DEVICE_COLLECTION,
                &id.to_hex(),
                DeviceError::NoDocuments,
            ));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_brand(&self, id: ObjectId, brand: &str) -> DeviceResult<()> {
        let brand = Self::parse_brand(brand)?;
        let now = Utc::now().trunc_subsecs(0);

        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "updatedAt": bson::DateTime::from_chrono(now),
                    "brand": brand.to_string(),
                } },
            )
            .await
            .map_err(|e| DeviceError::update(DEVICE_COLLECTION, e))?;

        if result.matched_count == 0 {
            return Err(DeviceError::could_not_find_with(
                DEVICE_COLLECTION,
                &id.to_hex(),
                DeviceError::NoDocuments,
            ));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> DeviceResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| DeviceError::delete(DEVICE_COLLECTION, e))?;

        if result.deleted_count == 0 {
            return Err(DeviceError::could_not_find_with(
                DEVICE_COLLECTION,
                &id.to_hex(),
                DeviceError::NoDocuments,
            ));
        }

        tracing::info!(device_id = %id.to_hex(), "device deleted");
        Ok(())
    }
}
