use std::sync::Arc;

use axum::{Extension, Json};
use churnscope_auth::{CurrentUser, TokenCodec};
use churnscope_http::{ApiResult, problem};
use tracing::info;

use super::dto::{CredentialsReq, ProfileDto, TokenDto};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Register a new account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    request_body = CredentialsReq,
    responses(
        (status = 200, description = "Account created", body = TokenDto),
        (status = 400, description = "Missing or implausible fields"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn signup(
    Extension(svc): Extension<Arc<Service>>,
    Extension(tokens): Extension<TokenCodec>,
    Json(body): Json<CredentialsReq>,
) -> ApiResult<Json<TokenDto>> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(problem::bad_request("Missing fields"));
    };

    let account = svc.signup(&email, &password).await?;
    let token = tokens.issue(account.id)?;

    Ok(Json(TokenDto { token }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = CredentialsReq,
    responses(
        (status = 200, description = "Authenticated", body = TokenDto),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Extension(tokens): Extension<TokenCodec>,
    Json(body): Json<CredentialsReq>,
) -> ApiResult<Json<TokenDto>> {
    // Absent fields get the same generic rejection as wrong ones.
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(DomainError::InvalidCredentials.into());
    };

    let account = svc.login(&email, &password).await?;
    let token = tokens.issue(account.id)?;

    Ok(Json(TokenDto { token }))
}

/// Profile of the authenticated account.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account profile", body = ProfileDto),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn me(
    CurrentUser(account_id): CurrentUser,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<ProfileDto>> {
    info!(%account_id, "fetching profile");

    let profile = svc.profile(account_id).await?;
    Ok(Json(ProfileDto::from(profile)))
}
