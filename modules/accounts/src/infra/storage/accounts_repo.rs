use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::model::Account;
use crate::infra::storage::entity::account;

/// Account persistence. Email uniqueness is enforced by the unique index
/// created in the migration; callers detect it via `DbErr::sql_err()`.
#[derive(Clone)]
pub struct AccountsRepository {
    conn: DatabaseConnection,
}

impl AccountsRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new account record. `email` must already be normalized.
    ///
    /// # Errors
    /// Propagates `DbErr`; a unique-constraint violation means the email is
    /// taken.
    pub async fn insert(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, DbErr> {
        let am = account::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            created_at: Set(OffsetDateTime::now_utc()),
        };
        let model = am.insert(&self.conn).await?;
        Ok(model.into())
    }

    /// # Errors
    /// Propagates `DbErr` on query failure.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DbErr> {
        let found = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.conn)
            .await?;
        Ok(found.map(Into::into))
    }

    /// # Errors
    /// Propagates `DbErr` on query failure.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DbErr> {
        let found = account::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }
}
