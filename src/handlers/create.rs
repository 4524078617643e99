use crate::auth::Authorized;
use crate::error::ApiError;
use crate::handlers::date_header;
use crate::models::Pet;
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderName, StatusCode, Uri},
    Json,
};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// POST /pet handler - Store a new pet
///
/// The body is read raw and deserialized after the authorization check, so a
/// malformed payload is a fault (500) rather than a client error.
#[utoipa::path(
    post,
    path = routes::PET,
    params(
        ("Authorization" = String, Header, description = "Shared secret")
    ),
    request_body = Pet,
    responses(
        (status = 200, description = "Pet stored", body = Pet,
            headers(("Location" = String, description = "URL of the create request"))),
        (status = 400, description = "Missing Authorization header", body = String),
        (status = 401, description = "Wrong shared secret", body = String),
        (status = 500, description = "Malformed pet or store failure", body = String)
    ),
    tag = "pets"
)]
pub async fn add_pet(
    _auth: Authorized,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, [(HeaderName, String); 2], Json<Pet>), ApiError> {
    let pet = Pet::from_payload(&body)?;

    let pet = state.pets.add(pet).await?;

    tracing::info!("Successfully stored pet with id: {}", pet.id);
    Ok((
        StatusCode::OK,
        [date_header(), (header::LOCATION, request_url(&uri, &headers))],
        Json(pet),
    ))
}

/// Reconstruct the URL the client called
///
/// Absolute-form request targets are echoed as-is; origin-form ones are
/// prefixed with the `Host` header when one was sent. The scheme comes from
/// `X-Forwarded-Proto` when a proxy terminated TLS, `http` otherwise.
fn request_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let Some(host) = headers.get(header::HOST).and_then(|host| host.to_str().ok()) else {
        return uri.to_string();
    };

    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|proto| proto.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .map(str::trim)
        .filter(|proto| !proto.is_empty())
        .unwrap_or("http");

    format!("{}://{}{}", scheme, host, uri)
}
