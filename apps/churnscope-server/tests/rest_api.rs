#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests against the composed router: signup/login, bearer auth,
//! the upload pipeline with a mocked scoring service, and ownership-scoped
//! retrieval, all over in-memory SQLite.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use churnscope_server::bootstrap;
use churnscope_server::config::AppConfig;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

async fn test_router(oracle_url: String) -> Router {
    let mut config = AppConfig::default();
    config.database.dsn = "sqlite::memory:".to_owned();
    config.oracle.base_url = oracle_url;
    config.oracle.timeout_secs = 2;

    let db = bootstrap::connect_database(&config.database.dsn)
        .await
        .expect("database should connect");
    let services = bootstrap::build_services(db, &config).expect("services should build");
    bootstrap::build_router(&services, &config).expect("router should build")
}

/// Router wired to a scoring stub that always answers with the given body.
/// The returned `MockServer` guard must stay alive for the router's lifetime.
async fn router_with_oracle(status: u16, body: Value) -> (Router, MockServer) {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/predict");
            then.status(status).json_body(body.clone());
        })
        .await;
    let router = test_router(server.url("")).await;
    (router, server)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post_json(router: &Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get_with_token(router: &Router, path: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

fn multipart_body(name: Option<&str>, file: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"customers.csv\"\r\nContent-Type: text/csv\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    router: &Router,
    token: &str,
    name: Option<&str>,
    file: Option<&[u8]>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/datasets/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(name, file)))
        .unwrap();
    send(router, request).await
}

async fn signup(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = post_json(
        router,
        "/auth/signup",
        &json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

const THREE_ROW_CSV: &[u8] = b"customer_id,tenure_months\nc1,12\nc2,3\nc3,44\n";

fn scores_3() -> Value {
    json!({
        "probabilities": [0.9, 0.2, 0.7],
        "feature_importances": {"tenure_months": 0.8}
    })
}

#[tokio::test]
async fn signup_login_me_round_trip() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    let token = signup(&router, "a@x.com", "secret").await;
    assert!(!token.is_empty());

    // Same credentials log in and the token opens /me.
    let (status, body) = post_json(
        &router,
        "/auth/login",
        &json!({"email": "a@x.com", "password": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let login_token = body["token"].as_str().unwrap();

    let (status, body) = get_with_token(&router, "/me", login_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["datasets"], json!([]));
}

#[tokio::test]
async fn signup_with_missing_fields_is_400() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    let (status, _) = post_json(&router, "/auth/signup", &json!({"email": "a@x.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_signup_is_409() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    signup(&router, "a@x.com", "secret").await;
    let (status, _) = post_json(
        &router,
        "/auth/signup",
        &json!({"email": "a@x.com", "password": "other"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_are_401_and_generic() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;
    signup(&router, "a@x.com", "secret").await;

    let (wrong_pw_status, wrong_pw) = post_json(
        &router,
        "/auth/login",
        &json!({"email": "a@x.com", "password": "wrong"}),
    )
    .await;
    let (unknown_status, unknown) = post_json(
        &router,
        "/auth/login",
        &json!({"email": "nobody@x.com", "password": "secret"}),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Indistinguishable bodies: no account enumeration.
    assert_eq!(wrong_pw["detail"], unknown["detail"]);
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/me")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_with_token(&router, "/me", "garbage.token.here").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_scores_and_persists_in_row_order() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;
    let token = signup(&router, "a@x.com", "secret").await;

    let (status, body) = upload(&router, &token, Some("q3"), Some(THREE_ROW_CSV)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["feature_importances"]["tenure_months"], 0.8);
    let dataset_id = body["dataset_id"].as_str().unwrap().to_owned();

    let (status, predictions) =
        get_with_token(&router, &format!("/datasets/{dataset_id}/predictions"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let predictions = predictions.as_array().unwrap();
    assert_eq!(predictions.len(), 3);

    let probabilities: Vec<f64> = predictions
        .iter()
        .map(|p| p["probability"].as_f64().unwrap())
        .collect();
    assert_eq!(probabilities, vec![0.9, 0.2, 0.7]);
    assert_eq!(predictions[0]["customer_id"], "c1");
    assert_eq!(predictions[0]["features"]["tenure_months"], "12");

    // Re-fetching returns identical ordered results.
    let (_, again) =
        get_with_token(&router, &format!("/datasets/{dataset_id}/predictions"), &token).await;
    assert_eq!(again.as_array().unwrap(), predictions);

    // The dataset shows up on /me and /datasets.
    let (_, me) = get_with_token(&router, "/me", &token).await;
    assert_eq!(me["datasets"][0]["name"], "q3");
    assert_eq!(me["datasets"][0]["prediction_count"], 3);

    let (_, list) = get_with_token(&router, "/datasets", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn upload_without_file_is_400() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;
    let token = signup(&router, "a@x.com", "secret").await;

    let (status, _) = upload(&router, &token, Some("q3"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_auth() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/datasets/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(None, Some(THREE_ROW_CSV))))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn oracle_error_is_502_and_persists_nothing() {
    let (router, _oracle) = router_with_oracle(500, json!({"error": "model exploded"})).await;
    let token = signup(&router, "a@x.com", "secret").await;

    let (status, _) = upload(&router, &token, None, Some(THREE_ROW_CSV)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, list) = get_with_token(&router, "/datasets", &token).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn probability_length_mismatch_is_502_and_persists_nothing() {
    // Two probabilities for a three-row upload.
    let (router, _oracle) = router_with_oracle(200, json!({"probabilities": [0.9, 0.2]})).await;
    let token = signup(&router, "a@x.com", "secret").await;

    let (status, _) = upload(&router, &token, None, Some(THREE_ROW_CSV)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, list) = get_with_token(&router, "/datasets", &token).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn predictions_are_owner_scoped() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;
    let owner_token = signup(&router, "owner@x.com", "secret").await;
    let stranger_token = signup(&router, "stranger@x.com", "secret").await;

    let (_, body) = upload(&router, &owner_token, None, Some(THREE_ROW_CSV)).await;
    let dataset_id = body["dataset_id"].as_str().unwrap().to_owned();
    let path = format!("/datasets/{dataset_id}/predictions");

    let (status, body) = get_with_token(&router, &path, &stranger_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    // Status only; the body carries no prediction data.
    assert!(body.get("probability").is_none());
    assert!(body.as_array().is_none());

    let unknown = uuid::Uuid::now_v7();
    let (status, _) =
        get_with_token(&router, &format!("/datasets/{unknown}/predictions"), &owner_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served_unauthenticated() {
    let (router, _oracle) = router_with_oracle(200, scores_3()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/datasets/upload"].is_object());
}
