//! Datasets module
//!
//! The ingestion-and-prediction pipeline: decode an uploaded table, forward
//! the rows to the external scoring service, persist one prediction per row
//! in a single transaction, and answer ownership-checked retrieval queries.
//!
//! The scoring service sits behind [`domain::ports::ScoringPort`]; the HTTP
//! implementation lives in [`infra::oracle`].

pub mod api;
pub mod domain;
pub mod infra;

pub use domain::model::{Dataset, DatasetSummary, Prediction, Scores, UploadOutcome};
pub use domain::ports::ScoringPort;
pub use domain::service::Service;
pub use infra::oracle::HttpOracleClient;
