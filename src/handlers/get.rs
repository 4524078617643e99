use crate::auth::Authorized;
use crate::error::ApiError;
use crate::handlers::date_header;
use crate::models::Pet;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::HeaderName, http::StatusCode, Json};

/// GET /pet/{id} handler - Fetch a single pet
#[utoipa::path(
    get,
    path = routes::PET_ITEM,
    params(
        ("id" = i32, Path, description = "Pet id"),
        ("Authorization" = String, Header, description = "Shared secret")
    ),
    responses(
        (status = 200, description = "Pet found", body = Pet),
        (status = 400, description = "Missing Authorization header", body = String),
        (status = 401, description = "Wrong shared secret", body = String),
        (status = 404, description = "Pet not found", body = String)
    ),
    tag = "pets"
)]
pub async fn get_pet_by_id(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Pet>), ApiError> {
    match state.pets.find_by_id(id).await? {
        Some(pet) => {
            tracing::info!("Successfully retrieved pet with id: {}", id);
            Ok((StatusCode::OK, [date_header()], Json(pet)))
        }
        None => {
            tracing::info!("Pet not found with id: {}", id);
            Err(ApiError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_bytes, body_text, request, SECRET};
    use axum::body::Body;
    use tower::ServiceExt;

    fn seeded_app() -> axum::Router {
        routes::router(AppState::in_memory(vec![Pet {
            id: 1,
            name: "Rex".to_string(),
            tag: Some("dog".to_string()),
        }]))
    }

    #[tokio::test]
    async fn test_get_pet_success() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/1", Some(SECRET), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let date = response.headers().get("date").unwrap().to_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());

        let body = body_bytes(response).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Rex", "tag": "dog"}));
    }

    #[tokio::test]
    async fn test_get_pet_not_found() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/99", Some(SECRET), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not Found");
    }

    #[tokio::test]
    async fn test_get_pet_missing_authorization() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/1", None, Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Bad Request");
    }

    #[tokio::test]
    async fn test_get_pet_wrong_secret() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/1", Some("000000"), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_unauthorized_takes_precedence_over_not_found() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/99", Some("nope"), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_pet_non_numeric_id() {
        let response = seeded_app()
            .oneshot(request("GET", "/pet/abc", Some(SECRET), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
