use std::collections::BTreeMap;

use time::OffsetDateTime;
use uuid::Uuid;

/// One uploaded batch of rows, owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// One row's churn probability plus the original feature values, positionally
/// tied to its source row via `row_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: Uuid,
    pub dataset_id: Uuid,
    pub row_index: i64,
    pub customer_id: Option<String>,
    pub probability: f64,
    pub features: serde_json::Value,
}

/// Prediction data for one decoded row, before persistence. The row index is
/// assigned at insert time from the slice position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    pub customer_id: Option<String>,
    pub probability: f64,
    pub features: serde_json::Value,
}

/// Listing/overview shape for a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub prediction_count: u64,
}

/// What the scoring service returns for one batch of rows. Probabilities are
/// positional; both value ranges are treated as opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    pub probabilities: Vec<f64>,
    pub feature_importances: BTreeMap<String, f64>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub dataset: Dataset,
    pub count: usize,
    pub feature_importances: BTreeMap<String, f64>,
}
