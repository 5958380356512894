use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::error::OracleError;
use crate::domain::model::Scores;

/// Boundary to the external scoring service.
///
/// The service is a black box: rows in, a positional probability array and a
/// feature-importance map out. Whether decoding happens before or after this
/// boundary is a property of the implementation behind it; the pipeline in
/// this repository decodes first and sends parsed rows.
#[async_trait]
pub trait ScoringPort: Send + Sync {
    async fn score(&self, rows: &[Map<String, Value>]) -> Result<Scores, OracleError>;
}
