use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};
use churnscope_auth::TokenCodec;

use super::handlers;
use crate::domain::service::Service;

/// Routes that are reachable without a token: signup and login are the only
/// unauthenticated operations in the service.
pub fn public_routes(service: Arc<Service>, tokens: TokenCodec) -> Router {
    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .layer(Extension(service))
        .layer(Extension(tokens))
}

/// Routes the server must wrap with the bearer-auth middleware.
pub fn protected_routes(service: Arc<Service>) -> Router {
    Router::new()
        .route("/me", get(handlers::me))
        .layer(Extension(service))
}
