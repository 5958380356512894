use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::DatasetSummary;

/// Outbound port for the dataset overview shown on `/me`.
///
/// The accounts module owns the summary shape; the adapter (wired at
/// bootstrap) maps whatever the datasets module exposes into it.
#[async_trait]
pub trait DatasetsPort: Send + Sync {
    async fn datasets_for_account(&self, owner: Uuid) -> Result<Vec<DatasetSummary>, DomainError>;
}

/// Port implementation for deployments without the datasets module wired in
/// (and for tests): every account simply owns no datasets.
pub struct NoDatasets;

#[async_trait]
impl DatasetsPort for NoDatasets {
    async fn datasets_for_account(
        &self,
        _owner: Uuid,
    ) -> Result<Vec<DatasetSummary>, DomainError> {
        Ok(Vec::new())
    }
}
