use std::sync::Arc;

use axum::extract::{Multipart, Path};
use axum::{Extension, Json};
use bytes::Bytes;
use churnscope_auth::CurrentUser;
use churnscope_http::{ApiResult, problem};
use tracing::info;
use uuid::Uuid;

use super::dto::{DatasetSummaryDto, PredictionDto, UploadResponseDto};
use crate::domain::service::Service;

/// Upload a table and score it.
///
/// Multipart parts: `file` (required, the CSV bytes) and `name` (optional
/// display name). Unknown parts are ignored.
#[utoipa::path(
    post,
    path = "/datasets/upload",
    tag = "Datasets",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dataset created with one prediction per row", body = UploadResponseDto),
        (status = 400, description = "Missing file or undecodable table"),
        (status = 401, description = "Missing or invalid token"),
        (status = 502, description = "Scoring service failure"),
        (status = 500, description = "Persistence failure"),
    )
)]
pub async fn upload(
    CurrentUser(owner): CurrentUser,
    Extension(svc): Extension<Arc<Service>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponseDto>> {
    let mut file: Option<Bytes> = None;
    let mut name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| problem::bad_request(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| problem::bad_request(format!("Unreadable file part: {e}")))?;
                file = Some(bytes);
            }
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| problem::bad_request(format!("Unreadable name part: {e}")))?;
                name = Some(text);
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(problem::bad_request("Missing file"));
    };

    info!(%owner, size = file.len(), "received upload");

    let outcome = svc.upload(owner, name, &file).await?;
    Ok(Json(UploadResponseDto::from(outcome)))
}

/// List the authenticated account's datasets, newest first.
#[utoipa::path(
    get,
    path = "/datasets",
    tag = "Datasets",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dataset summaries", body = [DatasetSummaryDto]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_datasets(
    CurrentUser(owner): CurrentUser,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<DatasetSummaryDto>>> {
    let summaries = svc.list_for_owner(owner).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// Predictions of one dataset, in upload row order.
#[utoipa::path(
    get,
    path = "/datasets/{id}/predictions",
    tag = "Datasets",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Dataset id")),
    responses(
        (status = 200, description = "Ordered predictions", body = [PredictionDto]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Dataset belongs to a different account"),
        (status = 404, description = "No dataset with this id"),
    )
)]
pub async fn get_predictions(
    CurrentUser(requester): CurrentUser,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<PredictionDto>>> {
    let predictions = svc.predictions(requester, id).await?;
    Ok(Json(predictions.into_iter().map(Into::into).collect()))
}
