//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Churnscope API",
        description = "Authenticated churn-prediction ingestion service"
    ),
    paths(
        accounts::api::rest::handlers::signup,
        accounts::api::rest::handlers::login,
        accounts::api::rest::handlers::me,
        datasets::api::rest::handlers::upload,
        datasets::api::rest::handlers::list_datasets,
        datasets::api::rest::handlers::get_predictions,
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
