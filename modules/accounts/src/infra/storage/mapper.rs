//! Conversions between SeaORM models and domain types.

use crate::domain::model::Account;
use crate::infra::storage::entity::account;

impl From<account::Model> for Account {
    fn from(m: account::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            created_at: m.created_at,
        }
    }
}
