//! In-process adapter giving the accounts module a view of the datasets
//! module, for the dataset summaries nested in `/me`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use accounts::domain::error::DomainError;
use accounts::domain::model::DatasetSummary;
use accounts::domain::ports::DatasetsPort;

pub struct LocalDatasetsGateway {
    datasets: Arc<datasets::Service>,
}

impl LocalDatasetsGateway {
    #[must_use]
    pub fn new(datasets: Arc<datasets::Service>) -> Self {
        Self { datasets }
    }
}

#[async_trait]
impl DatasetsPort for LocalDatasetsGateway {
    async fn datasets_for_account(&self, owner: Uuid) -> Result<Vec<DatasetSummary>, DomainError> {
        let summaries = self
            .datasets
            .list_for_owner(owner)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        Ok(summaries
            .into_iter()
            .map(|s| DatasetSummary {
                id: s.id,
                name: s.name,
                created_at: s.created_at,
                prediction_count: s.prediction_count,
            })
            .collect())
    }
}
