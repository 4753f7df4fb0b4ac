//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device API",
        version = "0.1.0",
        description = "Device registry REST API backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/device", api = domain_devices::ApiDoc)
    ),
    tags(
        (name = "Devices", description = "Device registry endpoints")
    )
)]
pub struct ApiDoc;
