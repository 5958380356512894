use thiserror::Error;
use uuid::Uuid;

/// Failure decoding an uploaded byte buffer into a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed table: {reason}")]
    Malformed { reason: String },
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Failure talking to the external scoring service. Any of these aborts the
/// upload before a dataset is created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("scoring service unreachable: {0}")]
    Unreachable(String),

    #[error("scoring service returned a bad response: {0}")]
    BadResponse(String),

    #[error("scoring service returned {actual} probabilities for {expected} rows")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: Uuid },

    /// The dataset exists but belongs to a different account.
    #[error("Dataset {id} is not owned by the requester")]
    NotOwner { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn dataset_not_found(id: Uuid) -> Self {
        Self::DatasetNotFound { id }
    }

    pub fn not_owner(id: Uuid) -> Self {
        Self::NotOwner { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
