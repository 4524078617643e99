use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::authorize;
use crate::handlers::{add_pet, get_pet_by_id, get_pets, health_handler};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const HEALTH: &str = "/health";
pub const PET: &str = "/pet";
pub const PET_ITEM: &str = "/pet/{id}";
pub const PETS: &str = "/pets";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Assemble the full application router
///
/// Only the pet routes pass through the authorization middleware.
pub fn router(state: AppState) -> Router {
    let pets = Router::new()
        .route(PET_ITEM, get(get_pet_by_id))
        .route(PETS, get(get_pets))
        .route(PET, post(add_pet))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    Router::new()
        .route(HEALTH, get(health_handler))
        .merge(pets)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
