use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

// Fixed plain-text bodies for error responses
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const BAD_REQUEST: &str = "Bad Request";
pub const NOT_FOUND: &str = "Not Found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for the pet endpoints
///
/// Each variant maps to a status code and one of the fixed bodies above.
/// Anything that is not an authorization or lookup failure is a fault and
/// surfaces as a generic 500.
#[derive(Debug)]
pub enum ApiError {
    /// No `Authorization` header on the invocation
    MissingAuthorization,
    /// `Authorization` header did not match the shared secret
    Unauthorized,
    /// Requested pet(s) not found
    NotFound,
    /// Unhandled fault: malformed payload or pet store failure
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingAuthorization => (StatusCode::BAD_REQUEST, BAD_REQUEST),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND),
            ApiError::Internal(err) => {
                tracing::error!("Invocation failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
            }
        };

        (status, message).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("Failed to deserialize pet"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_status_and_bodies() {
        let cases = [
            (ApiError::MissingAuthorization, StatusCode::BAD_REQUEST, "Bad Request"),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized"),
            (ApiError::NotFound, StatusCode::NOT_FOUND, "Not Found"),
            (
                ApiError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        ];

        for (error, status, body) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_text(response).await, body);
        }
    }

    #[test]
    fn test_json_error_becomes_internal() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }
}
