use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Account with email '{email}' already exists")]
    EmailTaken { email: String },

    /// Covers both unknown email and wrong password. The two cases are never
    /// distinguished outside server-side logs (anti-enumeration).
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found: {id}")]
    AccountNotFound { id: Uuid },

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

    pub fn email_taken(email: String) -> Self {
        Self::EmailTaken { email }
    }

    pub fn account_not_found(id: Uuid) -> Self {
        Self::AccountNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
