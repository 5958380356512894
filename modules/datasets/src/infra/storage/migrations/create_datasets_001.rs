use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r#"
CREATE TABLE IF NOT EXISTS datasets (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    owner_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_datasets_owner ON datasets(owner_id);

CREATE TABLE IF NOT EXISTS predictions (
    id UUID PRIMARY KEY NOT NULL,
    dataset_id UUID NOT NULL REFERENCES datasets(id),
    row_index BIGINT NOT NULL,
    customer_id VARCHAR(255),
    probability DOUBLE PRECISION NOT NULL,
    features TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_predictions_dataset_row
    ON predictions(dataset_id, row_index);
                "#
            }
            sea_orm::DatabaseBackend::MySql => {
                r#"
CREATE TABLE IF NOT EXISTS datasets (
    id VARCHAR(36) PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    owner_id VARCHAR(36) NOT NULL,
    created_at TIMESTAMP NOT NULL,
    KEY idx_datasets_owner (owner_id)
);

CREATE TABLE IF NOT EXISTS predictions (
    id VARCHAR(36) PRIMARY KEY NOT NULL,
    dataset_id VARCHAR(36) NOT NULL,
    row_index BIGINT NOT NULL,
    customer_id VARCHAR(255),
    probability DOUBLE NOT NULL,
    features TEXT NOT NULL,
    UNIQUE KEY idx_predictions_dataset_row (dataset_id, row_index),
    CONSTRAINT fk_predictions_dataset FOREIGN KEY (dataset_id) REFERENCES datasets(id)
);
                "#
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r#"
CREATE TABLE IF NOT EXISTS datasets (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_datasets_owner ON datasets(owner_id);

CREATE TABLE IF NOT EXISTS predictions (
    id TEXT PRIMARY KEY NOT NULL,
    dataset_id TEXT NOT NULL REFERENCES datasets(id),
    row_index INTEGER NOT NULL,
    customer_id TEXT,
    probability REAL NOT NULL,
    features TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_predictions_dataset_row
    ON predictions(dataset_id, row_index);
                "#
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let sql = "DROP TABLE IF EXISTS predictions; DROP TABLE IF EXISTS datasets;";
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
