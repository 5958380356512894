use time::OffsetDateTime;
use uuid::Uuid;

/// A registered account. `email` is stored lowercased; `password_hash` is an
/// argon2id PHC string and never leaves the accounts module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Summary of one dataset owned by an account, as surfaced on `/me`.
///
/// The full prediction list stays behind the datasets module's retrieval
/// endpoint; the profile only carries enough to render an overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub prediction_count: u64,
}

/// An account together with its dataset summaries.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub account: Account,
    pub datasets: Vec<DatasetSummary>,
}
