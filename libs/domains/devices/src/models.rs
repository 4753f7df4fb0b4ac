//! Device entity, brand enumeration, and wire DTOs.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{DeviceError, DeviceResult};

/// Closed set of recognized device brands.
///
/// Membership is the whole validity rule: a brand string is valid exactly
/// when it parses into one of these variants. Empty strings never parse,
/// which makes them invalid on write paths; list callers treat an empty
/// filter as "no filter" before a `Brand` is ever constructed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Brand {
    Brand1,
    Brand2,
    Brand3,
}

impl Brand {
    /// Membership test against the enumeration.
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Brand>().is_ok()
    }
}

/// The persisted device record.
///
/// `id` is absent until the store assigns one on insert. `created_at` is
/// stamped by the repository at creation and never touched again;
/// `updated_at` stays absent until the first successful mutation. Both are
/// whole-second resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub brand: Brand,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bson_datetime_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Device {
    /// A device as submitted for creation. The store assigns `id` and the
    /// repository overwrites `created_at` on insert.
    pub fn new(name: impl Into<String>, brand: Brand) -> Self {
        Self {
            id: None,
            name: name.into(),
            brand,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Hex rendering of the identifier, empty when none has been assigned.
    pub fn hex_id(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// BSON codec for optional datetimes. Present values are stored as native
/// BSON datetimes; absence is handled by `skip_serializing_if` on the field.
mod bson_datetime_option {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => bson::DateTime::from_chrono(*dt).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<bson::DateTime>::deserialize(deserializer)?;
        Ok(value.map(bson::DateTime::to_chrono))
    }
}

/// Device as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub brand: Brand,
    pub created_at: DateTime<Utc>,
}

impl From<&Device> for DeviceDto {
    fn from(device: &Device) -> Self {
        Self {
            id: device.hex_id(),
            name: device.name.clone(),
            brand: device.brand,
            created_at: device.created_at,
        }
    }
}

/// Response body for a successful creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedDeviceResponse {
    pub id: String,
    pub name: String,
}

impl From<&Device> for CreatedDeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            id: device.hex_id(),
            name: device.name.clone(),
        }
    }
}

/// Request body for creating a device.
///
/// `brand` arrives as a raw string so the wire contract can be enforced
/// here: it is mandatory and must be a recognized value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
}

impl CreateDeviceRequest {
    pub fn validate(&self) -> DeviceResult<Brand> {
        validate_required_brand(&self.brand)
    }

    pub fn into_device(self) -> DeviceResult<Device> {
        let brand = self.validate()?;
        Ok(Device::new(self.name, brand))
    }
}

/// Request body for a full update: both fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeviceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
}

impl UpdateDeviceRequest {
    pub fn validate(&self) -> DeviceResult<Brand> {
        validate_required_brand(&self.brand)
    }

    pub fn into_device(self, id: ObjectId) -> DeviceResult<Device> {
        let brand = self.validate()?;
        let mut device = Device::new(self.name, brand);
        device.id = Some(id);
        Ok(device)
    }
}

/// Request body for renaming a device. An empty name is allowed; the label
/// is free-form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeviceNameRequest {
    #[serde(default)]
    pub name: String,
}

/// Request body for re-branding a device. The brand value is validated by
/// the repository, not here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeviceBrandRequest {
    #[serde(default)]
    pub brand: String,
}

/// Query parameters for device listing. A missing or empty `brand` means
/// "no filter"; a non-empty value must be a member of the enumeration.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchDevicesQuery {
    pub brand: Option<String>,
}

fn validate_required_brand(brand: &str) -> DeviceResult<Brand> {
    if brand.is_empty() {
        return Err(DeviceError::required_parameter("brand", "body"));
    }
    brand.parse().map_err(|_| {
        DeviceError::invalid_parameter("brand", &format!("invalid value [{brand}]"))
    })
}
