use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::model::{DatasetSummary, Prediction, UploadOutcome};

/// Response for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub dataset_id: Uuid,
    /// Number of predictions created; equals the decoded row count.
    pub count: usize,
    pub feature_importances: BTreeMap<String, f64>,
}

/// One prediction, positionally tied to its source row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionDto {
    pub id: Uuid,
    pub dataset_id: Uuid,
    pub row_index: i64,
    pub customer_id: Option<String>,
    pub probability: f64,
    /// The source row exactly as uploaded, keyed by header.
    #[schema(value_type = Object)]
    pub features: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetSummaryDto {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub prediction_count: u64,
}

impl From<UploadOutcome> for UploadResponseDto {
    fn from(o: UploadOutcome) -> Self {
        Self {
            dataset_id: o.dataset.id,
            count: o.count,
            feature_importances: o.feature_importances,
        }
    }
}

impl From<Prediction> for PredictionDto {
    fn from(p: Prediction) -> Self {
        Self {
            id: p.id,
            dataset_id: p.dataset_id,
            row_index: p.row_index,
            customer_id: p.customer_id,
            probability: p.probability,
            features: p.features,
        }
    }
}

impl From<DatasetSummary> for DatasetSummaryDto {
    fn from(s: DatasetSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            created_at: s.created_at,
            prediction_count: s.prediction_count,
        }
    }
}
