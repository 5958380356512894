#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // Support module provides utilities that may not all be used

//! Test support utilities for `datasets` integration tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use datasets::domain::error::OracleError;
use datasets::domain::model::Scores;
use datasets::domain::ports::ScoringPort;
use datasets::domain::service::Service;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{Map, Value};

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    datasets::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Scoring stub returning a canned result regardless of input.
pub struct MockOracle(pub Result<Scores, OracleError>);

#[async_trait]
impl ScoringPort for MockOracle {
    async fn score(&self, _rows: &[Map<String, Value>]) -> Result<Scores, OracleError> {
        self.0.clone()
    }
}

/// Service over a fresh database and a mock oracle.
pub async fn service_with(oracle: MockOracle) -> Service {
    Service::new(inmem_db().await, Arc::new(oracle))
}

/// Service whose oracle answers with the given probabilities and an empty
/// importance map.
pub async fn service_scoring(probabilities: &[f64]) -> Service {
    service_with(MockOracle(Ok(Scores {
        probabilities: probabilities.to_vec(),
        feature_importances: BTreeMap::new(),
    })))
    .await
}

pub const THREE_ROW_CSV: &[u8] = b"customer_id,tenure_months\nc1,12\nc2,3\nc3,44\n";
