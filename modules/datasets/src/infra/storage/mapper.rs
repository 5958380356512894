//! Conversions between SeaORM models and domain types.
//!
//! Prediction models are converted in the repository because parsing the
//! stored `features` JSON can fail.

use crate::domain::model::Dataset;
use crate::infra::storage::entity::dataset;

impl From<dataset::Model> for Dataset {
    fn from(m: dataset::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            owner_id: m.owner_id,
            created_at: m.created_at,
        }
    }
}
