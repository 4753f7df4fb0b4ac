//! HTTP surface of the devices domain.
//!
//! Handlers decode and validate wire payloads, then call into the service.
//! Validation failures raised here (missing or unrecognized brand, malformed
//! identifiers, undecodable bodies) answer 400; everything the service
//! reports answers 500, not-found included, matching the service's
//! historical status mapping.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{DeviceError, DeviceResult, ErrorBody};
use crate::models::{
    CreateDeviceRequest, CreatedDeviceResponse, DeviceDto, SearchDevicesQuery,
    UpdateDeviceBrandRequest, UpdateDeviceNameRequest, UpdateDeviceRequest,
};
use crate::repository::DeviceRepository;
use crate::service::DeviceService;

/// OpenAPI documentation for the device resource.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_devices,
        create_device,
        get_device,
        update_device,
        update_device_name,
        update_device_brand,
        delete_device,
    ),
    components(schemas(
        DeviceDto,
        CreatedDeviceResponse,
        CreateDeviceRequest,
        UpdateDeviceRequest,
        UpdateDeviceNameRequest,
        UpdateDeviceBrandRequest,
        ErrorBody,
    )),
    tags(
        (name = "Devices", description = "Device registry endpoints")
    )
)]
pub struct ApiDoc;

/// Router over the device resource, rooted at the mount point.
pub fn router<R: DeviceRepository + 'static>(service: DeviceService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_devices).post(create_device))
        .route(
            "/{id}",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/{id}/name", put(update_device_name))
        .route("/{id}/brand", put(update_device_brand))
        .with_state(shared_service)
}

fn parse_object_id(id: &str) -> DeviceResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| DeviceError::invalid_parameter("id", &format!("invalid object id [{id}]")))
}

fn decoded<T>(payload: Result<Json<T>, JsonRejection>) -> DeviceResult<T> {
    let Json(body) = payload.map_err(|rejection| DeviceError::decode(rejection.body_text()))?;
    Ok(body)
}

/// List devices, optionally filtered by brand
#[utoipa::path(
    get,
    path = "",
    tag = "Devices",
    params(SearchDevicesQuery),
    responses(
        (status = 200, description = "Matching devices", body = Vec<DeviceDto>),
        (status = 400, description = "Unrecognized brand filter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
async fn list_devices<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Query(query): Query<SearchDevicesQuery>,
) -> DeviceResult<Json<Vec<DeviceDto>>> {
    // An absent or empty brand means "no filter"; only a non-empty value is
    // held to the enumeration.
    let brand = query.brand.as_deref().unwrap_or_default();
    if !brand.is_empty() && !crate::models::Brand::is_valid(brand) {
        return Err(DeviceError::invalid_parameter(
            "brand",
            &format!("invalid value [{brand}]"),
        ));
    }

    let devices = if brand.is_empty() {
        service.list_devices().await?
    } else {
        service.list_devices_by_brand(brand).await?
    };

    Ok(Json(devices.iter().map(DeviceDto::from).collect()))
}

/// Create a device
#[utoipa::path(
    post,
    path = "",
    tag = "Devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device created", body = CreatedDeviceResponse),
        (status = 400, description = "Missing or unrecognized brand, or undecodable body", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
async fn create_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> DeviceResult<impl IntoResponse> {
    let device = decoded(payload)?.into_device()?;
    let created = service.create_device(device).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedDeviceResponse::from(&created)),
    ))
}

/// Fetch a device by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Devices",
    params(
        ("id" = String, Path, description = "Device identifier (hex)")
    ),
    responses(
        (status = 200, description = "Device found", body = DeviceDto),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 500, description = "Unknown identifier or store failure", body = ErrorBody)
    )
)]
async fn get_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(id): Path<String>,
) -> DeviceResult<Json<DeviceDto>> {
    let id = parse_object_id(&id)?;
    let device = service.get_device(id).await?;
    Ok(Json(DeviceDto::from(&device)))
}

/// Replace a device's name and brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Devices",
    params(
        ("id" = String, Path, description = "Device identifier (hex)")
    ),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 204, description = "Device updated"),
        (status = 400, description = "Malformed request", body = ErrorBody),
        (status = 500, description = "Unknown identifier or store failure", body = ErrorBody)
    )
)]
async fn update_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> DeviceResult<StatusCode> {
    let body = decoded(payload)?;
    let id = parse_object_id(&id)?;
    let device = body.into_device(id)?;
    service.update_device(device).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a device
#[utoipa::path(
    put,
    path = "/{id}/name",
    tag = "Devices",
    params(
        ("id" = String, Path, description = "Device identifier (hex)")
    ),
    request_body = UpdateDeviceNameRequest,
    responses(
        (status = 204, description = "Name updated"),
        (status = 400, description = "Malformed request", body = ErrorBody),
        (status = 500, description = "Unknown identifier or store failure", body = ErrorBody)
    )
)]
async fn update_device_name<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeviceNameRequest>, JsonRejection>,
) -> DeviceResult<StatusCode> {
    let body = decoded(payload)?;
    let id = parse_object_id(&id)?;
    service.update_device_name(id, &body.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Re-brand a device
#[utoipa::path(
    put,
    path = "/{id}/brand",
    tag = "Devices",
    params(
        ("id" = String, Path, description = "Device identifier (hex)")
    ),
    request_body = UpdateDeviceBrandRequest,
    responses(
        (status = 204, description = "Brand updated"),
        (status = 400, description = "Malformed request", body = ErrorBody),
        (status = 500, description = "Unrecognized brand, unknown identifier, or store failure", body = ErrorBody)
    )
)]
async fn update_device_brand<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeviceBrandRequest>, JsonRejection>,
) -> DeviceResult<StatusCode> {
    let body = decoded(payload)?;
    let id = parse_object_id(&id)?;
    // The brand value is deliberately not checked here: the repository is
    // the validation boundary for this operation.
    service.update_device_brand(id, &body.brand).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a device
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Devices",
    params(
        ("id" = String, Path, description = "Device identifier (hex)")
    ),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 500, description = "Unknown identifier or store failure", body = ErrorBody)
    )
)]
async fn delete_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(id): Path<String>,
) -> DeviceResult<StatusCode> {
    let id = parse_object_id(&id)?;
    service.delete_device(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
