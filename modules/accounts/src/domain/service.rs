use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Account, AccountProfile};
use crate::domain::ports::DatasetsPort;
use crate::infra::storage::accounts_repo::AccountsRepository;

/// Credential store: signup, login, profile lookup.
pub struct Service {
    repo: AccountsRepository,
    datasets: Arc<dyn DatasetsPort>,
}

impl Service {
    #[must_use]
    pub fn new(db: DatabaseConnection, datasets: Arc<dyn DatasetsPort>) -> Self {
        Self {
            repo: AccountsRepository::new(db),
            datasets,
        }
    }

    /// Register a new account.
    ///
    /// The email is normalized to lowercase before storage, so the unique
    /// index enforces case-insensitive uniqueness. Uniqueness is decided by
    /// the storage layer at insert time; two racing signups cannot both
    /// succeed.
    ///
    /// # Errors
    /// - `DomainError::Validation` for an empty/implausible email or empty password
    /// - `DomainError::EmailTaken` when the email is already registered
    /// - `DomainError::Database` on storage failure
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<Account, DomainError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }

        let password_hash = churnscope_auth::hash_password(password)
            .map_err(|e| DomainError::database(format!("password hashing failed: {e}")))?;

        let account = self
            .repo
            .insert(Uuid::now_v7(), &email, &password_hash)
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    DomainError::email_taken(email.clone())
                }
                _ => DomainError::database(e.to_string()),
            })?;

        tracing::info!(account_id = %account.id, "account created");
        Ok(account)
    }

    /// Authenticate by email and password.
    ///
    /// # Errors
    /// Unknown email and wrong password both return
    /// `DomainError::InvalidCredentials`; callers cannot probe which emails
    /// are registered.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, DomainError> {
        let email = email.trim().to_lowercase();

        let found = self
            .repo
            .find_by_email(&email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let Some(account) = found else {
            tracing::debug!("login rejected: unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        if !churnscope_auth::verify_password(password, &account.password_hash) {
            tracing::debug!(account_id = %account.id, "login rejected: bad password");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(account)
    }

    /// # Errors
    /// Returns `DomainError::Database` on storage failure.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Account plus its dataset summaries, for `/me`.
    ///
    /// # Errors
    /// - `DomainError::AccountNotFound` when the id does not exist
    /// - `DomainError::Database` on storage failure
    #[instrument(skip(self))]
    pub async fn profile(&self, id: Uuid) -> Result<AccountProfile, DomainError> {
        let account = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::account_not_found(id))?;

        let datasets = self.datasets.datasets_for_account(account.id).await?;

        Ok(AccountProfile { account, datasets })
    }
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    // Minimal plausibility check; real deliverability is out of scope.
    let valid = email.len() >= 3
        && email.contains('@')
        && !email.starts_with('@')
        && !email.ends_with('@')
        && !email.contains(char::is_whitespace);
    if valid {
        Ok(email)
    } else {
        Err(DomainError::validation("email", "not a plausible address"))
    }
}
