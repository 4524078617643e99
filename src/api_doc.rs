use utoipa::OpenApi;

use crate::error::{HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::Pet;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "petstore-functions API",
        version = "1.0.0",
        description = "Pet CRUD endpoints guarded by a shared-secret Authorization header"
    ),
    paths(
        handlers::health::health_handler,
        handlers::get::get_pet_by_id,
        handlers::list::get_pets,
        handlers::create::add_pet
    ),
    components(
        schemas(
            Pet,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "pets", description = "Pet operations")
    )
)]
pub struct ApiDoc;
