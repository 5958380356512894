use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::model::{AccountProfile, DatasetSummary};

/// Request body for signup and login.
///
/// Fields are optional so that absence maps to this service's 400/401
/// contract instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialsReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDatasetDto {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub prediction_count: u64,
}

/// Account profile as returned by `GET /me`. The password hash never
/// appears in any DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub datasets: Vec<ProfileDatasetDto>,
}

impl From<DatasetSummary> for ProfileDatasetDto {
    fn from(s: DatasetSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            created_at: s.created_at,
            prediction_count: s.prediction_count,
        }
    }
}

impl From<AccountProfile> for ProfileDto {
    fn from(p: AccountProfile) -> Self {
        Self {
            id: p.account.id,
            email: p.account.email,
            created_at: p.account.created_at,
            datasets: p.datasets.into_iter().map(Into::into).collect(),
        }
    }
}
