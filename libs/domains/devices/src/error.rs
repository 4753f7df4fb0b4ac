//! Structured error taxonomy for the devices domain.
//!
//! Every failure the domain reports is one of a closed set of kinds, each
//! with a stable numeric code of the form `(prefix * 1000) + kind`. The
//! repository is the only layer that classifies raw store failures into
//! these kinds; everything above it passes them through untouched.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Fixed service identifier every error code is derived from.
pub const ERROR_PREFIX: i64 = 1500;

pub const REQUIRED_PARAMETER_CODE: i64 = 1;
pub const INVALID_PARAMETER_CODE: i64 = 2;
pub const CREATE_ERROR_CODE: i64 = 3;
pub const LIST_ERROR_CODE: i64 = 4;
pub const COULD_NOT_FIND_OBJECT_CODE: i64 = 5;
pub const UPDATE_ERROR_CODE: i64 = 6;
pub const DELETE_ERROR_CODE: i64 = 7;
pub const DECODE_ERROR_CODE: i64 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("parameter '{field}' in {location} is required")]
    RequiredParameter { field: String, location: String },

    #[error("parameter '{field}' is invalid '{reason}'")]
    InvalidParameter { field: String, reason: String },

    #[error("error creating {object} reason {reason}")]
    Create { object: String, reason: String },

    #[error("the {object} queried by {queried_by} returned an error: {reason}")]
    List {
        object: String,
        queried_by: String,
        reason: String,
    },

    /// Target identifier does not exist. `cause` carries the underlying
    /// store message when a store operation reported the miss, and is absent
    /// when the lookup itself came back empty.
    #[error(
        "the {object} with id {id} could not be found{}",
        .cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default()
    )]
    CouldNotFindObject {
        object: String,
        id: String,
        cause: Option<String>,
    },

    #[error("error updating {object} reason {reason}")]
    Update { object: String, reason: String },

    #[error("error deleting {object} reason {reason}")]
    Delete { object: String, reason: String },

    #[error("decode error: {reason}")]
    Decode { reason: String },

    /// Raw empty-result sentinel from the store, surfaced before it has been
    /// classified into the taxonomy. The service converts any that escape a
    /// lookup into a decorated [`DeviceError::CouldNotFindObject`].
    #[error("no documents in result")]
    NoDocuments,
}

impl DeviceError {
    pub fn required_parameter(field: &str, location: &str) -> Self {
        Self::RequiredParameter {
            field: field.to_string(),
            location: location.to_string(),
        }
    }

    pub fn invalid_parameter(field: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn create(object: &str, reason: impl std::fmt::Display) -> Self {
        Self::Create {
            object: object.to_string(),
            reason: reason.to_string(),
        }
    }

    /// A failed list query, described by the fields and values it was
    /// filtered on (`ALL` for unfiltered listings).
    pub fn list(object: &str, reason: impl std::fmt::Display, queried_by: &[&str]) -> Self {
        Self::List {
            object: object.to_string(),
            queried_by: queried_by.join(", "),
            reason: reason.to_string(),
        }
    }

    /// Not-found as observed by the lookup layer itself: no store cause.
    pub fn could_not_find(object: &str, id: &str) -> Self {
        Self::CouldNotFindObject {
            object: object.to_string(),
            id: id.to_string(),
            cause: None,
        }
    }

    /// Not-found reported by a store operation, decorated with its message.
    pub fn could_not_find_with(object: &str, id: &str, cause: impl std::fmt::Display) -> Self {
        Self::CouldNotFindObject {
            object: object.to_string(),
            id: id.to_string(),
            cause: Some(cause.to_string()),
        }
    }

    pub fn update(object: &str, reason: impl std::fmt::Display) -> Self {
        Self::Update {
            object: object.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn delete(object: &str, reason: impl std::fmt::Display) -> Self {
        Self::Delete {
            object: object.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            reason: reason.to_string(),
        }
    }

    /// Stable numeric code, `(prefix * 1000) + kind`.
    ///
    /// The pre-classification [`DeviceError::NoDocuments`] sentinel reports
    /// the not-found code should it ever reach a caller unclassified.
    pub fn code(&self) -> i64 {
        let kind = match self {
            Self::RequiredParameter { .. } => REQUIRED_PARAMETER_CODE,
            Self::InvalidParameter { .. } => INVALID_PARAMETER_CODE,
            Self::Create { .. } => CREATE_ERROR_CODE,
            Self::List { .. } => LIST_ERROR_CODE,
            Self::CouldNotFindObject { .. } | Self::NoDocuments => COULD_NOT_FIND_OBJECT_CODE,
            Self::Update { .. } => UPDATE_ERROR_CODE,
            Self::Delete { .. } => DELETE_ERROR_CODE,
            Self::Decode { .. } => DECODE_ERROR_CODE,
        };
        ERROR_PREFIX * 1000 + kind
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Wire shape of every error response. `result` is always `false` and exists
/// for compatibility with the service's response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub result: bool,
    pub code: i64,
    pub message: String,
}

impl From<&DeviceError> for ErrorBody {
    fn from(err: &DeviceError) -> Self {
        Self {
            result: false,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for DeviceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RequiredParameter { .. } | Self::InvalidParameter { .. } | Self::Decode { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_prefix_and_kind() {
        assert_eq!(
            DeviceError::required_parameter("brand", "body").code(),
            1500001
        );
        assert_eq!(
            DeviceError::invalid_parameter("brand", "invalid value").code(),
            1500002
        );
        assert_eq!(DeviceError::create("device", "boom").code(), 1500003);
        assert_eq!(DeviceError::list("device", "boom", &["ALL"]).code(), 1500004);
        assert_eq!(DeviceError::could_not_find("device", "abc").code(), 1500005);
        assert_eq!(DeviceError::update("device", "boom").code(), 1500006);
        assert_eq!(DeviceError::delete("device", "boom").code(), 1500007);
        assert_eq!(DeviceError::decode("EOF").code(), 1500008);
    }

    #[test]
    fn required_parameter_message() {
        let err = DeviceError::required_parameter("brand", "body");
        assert_eq!(err.to_string(), "parameter 'brand' in body is required");
    }

    #[test]
    fn invalid_parameter_message() {
        let err = DeviceError::invalid_parameter("brand", "invalid value [brandx]");
        assert_eq!(
            err.to_string(),
            "parameter 'brand' is invalid 'invalid value [brandx]'"
        );
    }

    #[test]
    fn not_found_message_is_plain_without_cause() {
        let err = DeviceError::could_not_find("device", "652d1b2e9c1a4e0012345678");
        assert_eq!(
            err.to_string(),
            "the device with id 652d1b2e9c1a4e0012345678 could not be found"
        );
    }

    #[test]
    fn not_found_message_carries_store_cause() {
        let err = DeviceError::could_not_find_with(
            "device",
            "652d1b2e9c1a4e0012345678",
            DeviceError::NoDocuments,
        );
        assert_eq!(
            err.to_string(),
            "the device with id 652d1b2e9c1a4e0012345678 could not be found: no documents in result"
        );
    }

    #[test]
    fn list_message_joins_query_fields() {
        let err = DeviceError::list("device", "cursor exhausted", &["brand", "brand2"]);
        assert_eq!(
            err.to_string(),
            "the device queried by brand, brand2 returned an error: cursor exhausted"
        );
    }

    #[test]
    fn no_documents_sentinel_reports_not_found_code() {
        assert_eq!(DeviceError::NoDocuments.code(), 1500005);
    }

    #[test]
    fn error_body_serializes_envelope() {
        let err = DeviceError::decode("EOF");
        let body = ErrorBody::from(&err);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": false,
                "code": 1500008,
                "message": "decode error: EOF",
            })
        );
    }
}
