use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::model::{Dataset, DatasetSummary, NewPrediction, Prediction};
use crate::infra::storage::entity::{dataset, prediction};

/// Dataset and prediction persistence.
#[derive(Clone)]
pub struct DatasetsRepository {
    conn: DatabaseConnection,
}

impl DatasetsRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create a dataset and all of its predictions in one transaction.
    ///
    /// Row indexes are assigned from slice positions, preserving upload
    /// order. If any insert fails the transaction rolls back and no dataset
    /// is visible afterwards. `predictions` must be non-empty.
    ///
    /// # Errors
    /// Propagates `DbErr` from either insert; the transaction is rolled
    /// back in that case.
    pub async fn create_dataset_with_predictions(
        &self,
        owner: Uuid,
        name: &str,
        predictions: &[NewPrediction],
    ) -> Result<Dataset, DbErr> {
        let name = name.to_owned();
        let predictions = predictions.to_vec();

        let model = self
            .conn
            .transaction::<_, dataset::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let created = dataset::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        name: Set(name),
                        owner_id: Set(owner),
                        created_at: Set(OffsetDateTime::now_utc()),
                    }
                    .insert(txn)
                    .await?;

                    let rows = predictions
                        .iter()
                        .enumerate()
                        .map(|(i, p)| {
                            let row_index = i64::try_from(i)
                                .map_err(|e| DbErr::Custom(format!("row index overflow: {e}")))?;
                            let features = serde_json::to_string(&p.features).map_err(|e| {
                                DbErr::Custom(format!("features not serializable: {e}"))
                            })?;
                            Ok(prediction::ActiveModel {
                                id: Set(Uuid::now_v7()),
                                dataset_id: Set(created.id),
                                row_index: Set(row_index),
                                customer_id: Set(p.customer_id.clone()),
                                probability: Set(p.probability),
                                features: Set(features),
                            })
                        })
                        .collect::<Result<Vec<_>, DbErr>>()?;

                    prediction::Entity::insert_many(rows).exec(txn).await?;

                    Ok(created)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
            })?;

        Ok(model.into())
    }

    /// # Errors
    /// Propagates `DbErr` on query failure.
    pub async fn find_dataset(&self, id: Uuid) -> Result<Option<Dataset>, DbErr> {
        let found = dataset::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    /// Predictions of a dataset ordered by row index.
    ///
    /// # Errors
    /// Propagates `DbErr`; a stored `features` value that fails to parse as
    /// JSON surfaces as `DbErr::Custom`.
    pub async fn predictions_for(&self, dataset_id: Uuid) -> Result<Vec<Prediction>, DbErr> {
        let models = prediction::Entity::find()
            .filter(prediction::Column::DatasetId.eq(dataset_id))
            .order_by_asc(prediction::Column::RowIndex)
            .all(&self.conn)
            .await?;

        models
            .into_iter()
            .map(|m| {
                let features = serde_json::from_str(&m.features)
                    .map_err(|e| DbErr::Custom(format!("stored features unreadable: {e}")))?;
                Ok(Prediction {
                    id: m.id,
                    dataset_id: m.dataset_id,
                    row_index: m.row_index,
                    customer_id: m.customer_id,
                    probability: m.probability,
                    features,
                })
            })
            .collect()
    }

    /// Dataset summaries for an owner, newest first.
    ///
    /// # Errors
    /// Propagates `DbErr` on query failure.
    pub async fn summaries_for_owner(&self, owner: Uuid) -> Result<Vec<DatasetSummary>, DbErr> {
        let datasets = dataset::Entity::find()
            .filter(dataset::Column::OwnerId.eq(owner))
            .order_by_desc(dataset::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        let mut summaries = Vec::with_capacity(datasets.len());
        for ds in datasets {
            let prediction_count = prediction::Entity::find()
                .filter(prediction::Column::DatasetId.eq(ds.id))
                .count(&self.conn)
                .await?;
            summaries.push(DatasetSummary {
                id: ds.id,
                name: ds.name,
                created_at: ds.created_at,
                prediction_count,
            });
        }
        Ok(summaries)
    }
}
