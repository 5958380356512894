//! Database, service and router wiring.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router, middleware};
use churnscope_auth::TokenCodec;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;
use utoipa::OpenApi;

use crate::config::AppConfig;
use crate::gateway::LocalDatasetsGateway;
use crate::openapi::ApiDoc;

/// Everything the router needs, constructed once at startup.
pub struct Services {
    pub accounts: Arc<accounts::Service>,
    pub datasets: Arc<datasets::Service>,
    pub tokens: TokenCodec,
}

/// Connect to the configured database and bring both modules' schemas up.
///
/// # Errors
/// Fails when the DSN is unreachable or a migration cannot be applied.
pub async fn connect_database(dsn: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(dsn)
        .await
        .context("connecting to database")?;

    accounts::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("applying accounts migrations")?;
    datasets::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("applying datasets migrations")?;

    Ok(db)
}

/// Construct module services over one shared database connection.
///
/// # Errors
/// Fails when the oracle base URL is invalid or the HTTP client cannot be
/// built.
pub fn build_services(db: DatabaseConnection, config: &AppConfig) -> Result<Services> {
    let tokens = TokenCodec::new(&config.auth.secret);

    let base_url =
        Url::parse(&config.oracle.base_url).context("oracle.base_url is not a valid URL")?;
    let oracle = datasets::HttpOracleClient::new(
        base_url,
        Duration::from_secs(config.oracle.timeout_secs),
    )
    .context("building scoring service client")?;

    let datasets_svc = Arc::new(datasets::Service::new(db.clone(), Arc::new(oracle)));
    let accounts_svc = Arc::new(accounts::Service::new(
        db,
        Arc::new(LocalDatasetsGateway::new(datasets_svc.clone())),
    ));

    Ok(Services {
        accounts: accounts_svc,
        datasets: datasets_svc,
        tokens,
    })
}

/// Compose the full application router.
///
/// Signup, login and the OpenAPI document are public; every other route is
/// wrapped by the bearer-auth middleware, so no handler runs without a
/// verified token.
///
/// # Errors
/// Fails when a configured CORS origin is not a valid header value.
pub fn build_router(services: &Services, config: &AppConfig) -> Result<Router> {
    let public = accounts::api::rest::routes::public_routes(
        services.accounts.clone(),
        services.tokens.clone(),
    )
    .route("/api-docs/openapi.json", get(openapi_json));

    let protected = accounts::api::rest::routes::protected_routes(services.accounts.clone())
        .merge(datasets::api::rest::routes::protected_routes(
            services.datasets.clone(),
        ))
        .layer(middleware::from_fn_with_state(
            services.tokens.clone(),
            churnscope_auth::require_auth,
        ));

    let origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|o| HeaderValue::from_str(o))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid CORS origin in configuration")?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]);

    Ok(Router::new()
        .merge(public)
        .merge(protected)
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
