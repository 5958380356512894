//! Axum extractors and middleware for auth.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use churnscope_http::{Problem, problem};
use uuid::Uuid;

use crate::token::{TokenCodec, TokenError};

/// Verified identity of the requester, injected by [`require_auth`].
///
/// Handlers take this as an extractor; it fails closed when the middleware
/// did not run for the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().copied().ok_or_else(|| {
            tracing::error!("CurrentUser extracted on a route without auth middleware");
            problem::internal_error("Authentication middleware is not configured")
        })
    }
}

/// Middleware enforcing `Authorization: Bearer <token>` on every request it
/// wraps. On success the verified subject is inserted into request
/// extensions as [`CurrentUser`]; otherwise the request is answered with a
/// 401 Problem and never reaches a handler.
pub async fn require_auth(
    State(codec): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return problem::unauthorized("Missing bearer token").into_response();
    };

    match codec.verify(token) {
        Ok(subject) => {
            request.extensions_mut().insert(CurrentUser(subject));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            Problem::from(e).into_response()
        }
    }
}

impl From<TokenError> for Problem {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed | TokenError::SignatureInvalid => {
                problem::unauthorized("Invalid token")
            }
            TokenError::Expired => problem::unauthorized("Token expired"),
            TokenError::Signing(ref detail) => {
                tracing::error!(detail, "token signing failed");
                problem::internal_error("Could not issue token")
            }
        }
    }
}

/// Extract Bearer token from Authorization header
#[must_use]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
}
