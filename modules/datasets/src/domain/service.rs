use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::{DomainError, OracleError};
use crate::domain::model::{DatasetSummary, NewPrediction, Prediction, UploadOutcome};
use crate::domain::ports::ScoringPort;
use crate::domain::table;
use crate::infra::storage::datasets_repo::DatasetsRepository;

/// The ingestion pipeline: decode, score, persist, retrieve.
pub struct Service {
    repo: DatasetsRepository,
    oracle: Arc<dyn ScoringPort>,
}

impl Service {
    #[must_use]
    pub fn new(db: DatabaseConnection, oracle: Arc<dyn ScoringPort>) -> Self {
        Self {
            repo: DatasetsRepository::new(db),
            oracle,
        }
    }

    /// Run one upload through the full pipeline.
    ///
    /// Order is deliberate: decode and score before anything is written, so
    /// every failure up to and including the scoring call leaves no trace.
    /// The dataset row and all predictions are then inserted in a single
    /// transaction; a persistence failure rolls back both.
    ///
    /// # Errors
    /// - `DomainError::Decode` when the buffer is not a well-formed table
    /// - `DomainError::Validation` when the table has no data rows
    /// - `DomainError::Oracle` for unreachable/bad-response/length-mismatch
    ///   scoring failures
    /// - `DomainError::Database` when persistence fails
    #[instrument(skip(self, bytes), fields(owner = %owner, size = bytes.len()))]
    pub async fn upload(
        &self,
        owner: Uuid,
        name: Option<String>,
        bytes: &[u8],
    ) -> Result<UploadOutcome, DomainError> {
        let table = table::decode(bytes)?;
        if table.is_empty() {
            return Err(DomainError::validation("file", "no data rows"));
        }

        let rows = table.row_objects();
        let scores = self.oracle.score(&rows).await?;

        // The probability array is positional; anything but an exact length
        // match would silently mis-assign rows.
        if scores.probabilities.len() != rows.len() {
            return Err(OracleError::LengthMismatch {
                expected: rows.len(),
                actual: scores.probabilities.len(),
            }
            .into());
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(default_dataset_name);

        let predictions: Vec<NewPrediction> = rows
            .into_iter()
            .zip(&scores.probabilities)
            .enumerate()
            .map(|(i, (row, &probability))| NewPrediction {
                customer_id: table.customer_id(i).map(ToOwned::to_owned),
                probability,
                features: serde_json::Value::Object(row),
            })
            .collect();

        let dataset = self
            .repo
            .create_dataset_with_predictions(owner, &name, &predictions)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(dataset_id = %dataset.id, count = predictions.len(), "upload scored and persisted");

        Ok(UploadOutcome {
            dataset,
            count: predictions.len(),
            feature_importances: scores.feature_importances,
        })
    }

    /// Predictions of a dataset, in row order, for its owner only.
    ///
    /// # Errors
    /// - `DomainError::DatasetNotFound` when no dataset has this id
    /// - `DomainError::NotOwner` when it belongs to a different account
    /// - `DomainError::Database` on storage failure
    #[instrument(skip(self))]
    pub async fn predictions(
        &self,
        requester: Uuid,
        dataset_id: Uuid,
    ) -> Result<Vec<Prediction>, DomainError> {
        let dataset = self
            .repo
            .find_dataset(dataset_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::dataset_not_found(dataset_id))?;

        if dataset.owner_id != requester {
            warn!(owner = %dataset.owner_id, "requester is not the dataset owner");
            return Err(DomainError::not_owner(dataset_id));
        }

        self.repo
            .predictions_for(dataset_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Summaries of all datasets owned by `owner`, newest first.
    ///
    /// # Errors
    /// Returns `DomainError::Database` on storage failure.
    pub async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<DatasetSummary>, DomainError> {
        self.repo
            .summaries_for_owner(owner)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }
}

fn default_dataset_name() -> String {
    format!("dataset-{}", OffsetDateTime::now_utc().unix_timestamp())
}
