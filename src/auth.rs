//! Shared-secret authorization for the pet endpoints.
//!
//! [`authorize`] runs in front of every pet route. It compares the
//! `Authorization` header against the configured secret and records the
//! outcome as an [`Access`] marker in the request extensions. The handlers
//! then take an [`Authorized`] extractor, which turns a missing marker into
//! 400 and an `Unauthorized` marker into 401.

use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Access;
use crate::state::AppState;

/// Decide access for an invocation, or `None` when no header was sent.
pub fn access_for(headers: &HeaderMap, secret: &str) -> Option<Access> {
    let value = headers.get(header::AUTHORIZATION)?;

    match value.to_str() {
        Ok(value) if value == secret => Some(Access::Authorized),
        _ => Some(Access::Unauthorized),
    }
}

/// Middleware stamping each invocation with its [`Access`] marker
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let function = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = tracing::info_span!(
        "invocation",
        invocation_id = %Uuid::new_v4(),
        function = %function,
    );

    async move {
        tracing::info!("Start {} function execution.", function);

        if let Some(access) = access_for(req.headers(), &state.config.auth_secret) {
            req.extensions_mut().insert(access);
        }

        let response = next.run(req).await;

        tracing::info!("End {} function execution.", function);
        response
    }
    .instrument(span)
    .await
}

/// Proof that the invocation carried the shared secret
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Access>() {
            None => Err(ApiError::MissingAuthorization),
            Some(Access::Unauthorized) => Err(ApiError::Unauthorized),
            Some(Access::Authorized) => Ok(Authorized),
        }
    }
}
