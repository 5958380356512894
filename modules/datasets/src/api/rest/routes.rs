use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use super::handlers;
use crate::domain::service::Service;

/// Dataset routes. Every one of them requires a verified identity; the
/// server wraps the returned router with the bearer-auth middleware.
pub fn protected_routes(service: Arc<Service>) -> Router {
    Router::new()
        .route("/datasets", get(handlers::list_datasets))
        .route("/datasets/upload", post(handlers::upload))
        .route("/datasets/{id}/predictions", get(handlers::get_predictions))
        .layer(Extension(service))
}
