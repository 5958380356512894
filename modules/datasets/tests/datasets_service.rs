#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the upload pipeline and ownership-scoped retrieval,
//! over in-memory SQLite with a mocked scoring service.

mod support;

use std::collections::BTreeMap;
use std::sync::Arc;

use datasets::domain::error::{DomainError, OracleError};
use datasets::domain::model::Scores;
use datasets::domain::service::Service;
use support::{MockOracle, THREE_ROW_CSV, inmem_db, service_scoring, service_with};
use uuid::Uuid;

#[tokio::test]
async fn upload_creates_one_prediction_per_row_in_order() {
    let svc = service_scoring(&[0.9, 0.2, 0.7]).await;
    let owner = Uuid::now_v7();

    let outcome = svc
        .upload(owner, Some("q3".to_owned()), THREE_ROW_CSV)
        .await
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(outcome.dataset.name, "q3");
    assert_eq!(outcome.dataset.owner_id, owner);

    let predictions = svc.predictions(owner, outcome.dataset.id).await.unwrap();
    assert_eq!(predictions.len(), 3);

    let probabilities: Vec<f64> = predictions.iter().map(|p| p.probability).collect();
    assert_eq!(probabilities, vec![0.9, 0.2, 0.7]);

    let customer_ids: Vec<Option<&str>> =
        predictions.iter().map(|p| p.customer_id.as_deref()).collect();
    assert_eq!(customer_ids, vec![Some("c1"), Some("c2"), Some("c3")]);

    let row_indexes: Vec<i64> = predictions.iter().map(|p| p.row_index).collect();
    assert_eq!(row_indexes, vec![0, 1, 2]);
}

#[tokio::test]
async fn features_round_trip_the_decoded_row_exactly() {
    let svc = service_scoring(&[0.5]).await;
    let owner = Uuid::now_v7();

    let outcome = svc
        .upload(owner, None, b"customer_id,tenure_months,plan\nc9,7,gold\n")
        .await
        .unwrap();

    let predictions = svc.predictions(owner, outcome.dataset.id).await.unwrap();
    assert_eq!(
        predictions[0].features,
        serde_json::json!({"customer_id": "c9", "tenure_months": "7", "plan": "gold"})
    );
}

#[tokio::test]
async fn customer_id_is_null_when_column_is_absent() {
    let svc = service_scoring(&[0.5, 0.6]).await;
    let owner = Uuid::now_v7();

    let outcome = svc
        .upload(owner, None, b"tenure_months\n12\n3\n")
        .await
        .unwrap();

    let predictions = svc.predictions(owner, outcome.dataset.id).await.unwrap();
    assert!(predictions.iter().all(|p| p.customer_id.is_none()));
}

#[tokio::test]
async fn feature_importances_pass_through() {
    let importances: BTreeMap<String, f64> =
        [("tenure_months".to_owned(), 0.8)].into_iter().collect();
    let svc = service_with(MockOracle(Ok(Scores {
        probabilities: vec![0.1],
        feature_importances: importances.clone(),
    })))
    .await;

    let outcome = svc
        .upload(Uuid::now_v7(), None, b"tenure_months\n12\n")
        .await
        .unwrap();
    assert_eq!(outcome.feature_importances, importances);
}

#[tokio::test]
async fn missing_name_gets_a_generated_default() {
    let svc = service_scoring(&[0.5]).await;

    let outcome = svc
        .upload(Uuid::now_v7(), None, b"a\n1\n")
        .await
        .unwrap();
    assert!(
        outcome.dataset.name.starts_with("dataset-"),
        "unexpected default name: {}",
        outcome.dataset.name
    );
}

#[tokio::test]
async fn length_mismatch_persists_nothing() {
    // 3 rows, 2 probabilities.
    let svc = service_scoring(&[0.9, 0.2]).await;
    let owner = Uuid::now_v7();

    let err = svc.upload(owner, None, THREE_ROW_CSV).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Oracle(OracleError::LengthMismatch {
            expected: 3,
            actual: 2
        })
    ));

    assert!(svc.list_for_owner(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn oracle_failure_persists_nothing() {
    let svc = service_with(MockOracle(Err(OracleError::BadResponse(
        "HTTP 500".to_owned(),
    ))))
    .await;
    let owner = Uuid::now_v7();

    let err = svc.upload(owner, None, THREE_ROW_CSV).await.unwrap_err();
    assert!(matches!(err, DomainError::Oracle(OracleError::BadResponse(_))));

    assert!(svc.list_for_owner(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_table_fails_before_the_oracle() {
    // The oracle would fail the upload anyway; a decode error must win.
    let svc = service_with(MockOracle(Err(OracleError::Unreachable(
        "never called".to_owned(),
    ))))
    .await;

    let err = svc
        .upload(Uuid::now_v7(), None, b"a,b\n1\n")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Decode(_)));
}

#[tokio::test]
async fn header_only_upload_is_a_validation_error() {
    let svc = service_scoring(&[]).await;

    let err = svc
        .upload(Uuid::now_v7(), None, b"customer_id,tenure_months\n")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn retrieval_is_owner_scoped() {
    let svc = service_scoring(&[0.9, 0.2, 0.7]).await;
    let owner = Uuid::now_v7();
    let stranger = Uuid::now_v7();

    let outcome = svc.upload(owner, None, THREE_ROW_CSV).await.unwrap();

    let err = svc.predictions(stranger, outcome.dataset.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotOwner { .. }));
}

#[tokio::test]
async fn unknown_dataset_is_not_found() {
    let svc = service_scoring(&[]).await;

    let err = svc
        .predictions(Uuid::now_v7(), Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DatasetNotFound { .. }));
}

#[tokio::test]
async fn refetching_predictions_is_idempotent() {
    let svc = service_scoring(&[0.9, 0.2, 0.7]).await;
    let owner = Uuid::now_v7();

    let outcome = svc.upload(owner, None, THREE_ROW_CSV).await.unwrap();

    let first = svc.predictions(owner, outcome.dataset.id).await.unwrap();
    let second = svc.predictions(owner, outcome.dataset.id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn concurrent_uploads_with_the_same_name_get_distinct_datasets() {
    let db = inmem_db().await;
    let mk = |probs: Vec<f64>| {
        Service::new(
            db.clone(),
            Arc::new(MockOracle(Ok(Scores {
                probabilities: probs,
                feature_importances: BTreeMap::new(),
            }))),
        )
    };
    let owner = Uuid::now_v7();

    let svc_a = mk(vec![0.9, 0.2, 0.7]);
    let svc_b = mk(vec![0.9, 0.2, 0.7]);
    let (a, b) = tokio::join!(
        svc_a.upload(owner, Some("same-name".to_owned()), THREE_ROW_CSV),
        svc_b.upload(owner, Some("same-name".to_owned()), THREE_ROW_CSV),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.dataset.id, b.dataset.id);
    assert_eq!(a.dataset.name, b.dataset.name);

    let summaries = mk(vec![]).list_for_owner(owner).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.prediction_count == 3));
}
