//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sweet Shop API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing the sweet shop inventory",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_sweets::ApiDoc)
    ),
    tags(
        (name = "Sweets", description = "Sweet shop inventory endpoints")
    )
)]
pub struct ApiDoc;
