#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // Support module provides utilities that may not all be used

//! Test support utilities for `accounts` integration tests.

use std::sync::Arc;

use accounts::domain::model::DatasetSummary;
use accounts::domain::ports::{DatasetsPort, NoDatasets};
use accounts::domain::service::Service;
use accounts::domain::error::DomainError;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    accounts::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Service over a fresh in-memory database with no datasets wired in.
pub async fn inmem_service() -> Service {
    Service::new(inmem_db().await, Arc::new(NoDatasets))
}

/// Datasets port returning a fixed set of summaries for every account.
pub struct FixedDatasets(pub Vec<DatasetSummary>);

#[async_trait]
impl DatasetsPort for FixedDatasets {
    async fn datasets_for_account(
        &self,
        _owner: Uuid,
    ) -> Result<Vec<DatasetSummary>, DomainError> {
        Ok(self.0.clone())
    }
}
