//! Infrastructure storage layer for datasets and predictions.
//!
//! All SeaORM-specific code lives here. The one non-obvious contract is in
//! [`datasets_repo::DatasetsRepository::create_dataset_with_predictions`]:
//! dataset and predictions are written in a single transaction, so no
//! partially persisted dataset is ever visible to reads.

pub mod datasets_repo;
pub mod entity;
pub mod mapper;
pub mod migrations;
