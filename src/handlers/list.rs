use crate::auth::Authorized;
use crate::error::ApiError;
use crate::handlers::date_header;
use crate::models::Pet;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::HeaderName, http::StatusCode, Json};

/// GET /pets handler - List every pet
///
/// An empty store answers 404 rather than an empty array.
#[utoipa::path(
    get,
    path = routes::PETS,
    params(
        ("Authorization" = String, Header, description = "Shared secret")
    ),
    responses(
        (status = 200, description = "All pets", body = Vec<Pet>),
        (status = 400, description = "Missing Authorization header", body = String),
        (status = 401, description = "Wrong shared secret", body = String),
        (status = 404, description = "No pets stored", body = String)
    ),
    tag = "pets"
)]
pub async fn get_pets(
    _auth: Authorized,
    State(state): State<AppState>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Vec<Pet>>), ApiError> {
    let pets = state.pets.get_all().await?;

    if pets.is_empty() {
        tracing::info!("No pets to list");
        return Err(ApiError::NotFound);
    }

    tracing::info!("Listed {} pets", pets.len());
    Ok((StatusCode::OK, [date_header()], Json(pets)))
}
