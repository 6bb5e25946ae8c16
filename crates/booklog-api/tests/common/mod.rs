//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use booklog_api::state::AppState;
use booklog_library::application::service::ReadingLog;
use booklog_store::sqlite_store::SqliteKeyValueStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// History length used across all integration tests.
pub const TEST_HISTORY_LIMIT: usize = 3;

/// Build the full app router over a fresh in-memory `SQLite` store.
/// Uses the same route structure as `main.rs`.
pub async fn build_test_app() -> Router {
    let store = SqliteKeyValueStore::in_memory().await.unwrap();
    build_test_app_with_store(store).await
}

/// Build the full app router over an existing store.
pub async fn build_test_app_with_store(store: SqliteKeyValueStore) -> Router {
    let reading_log = ReadingLog::open(Arc::new(store)).await.unwrap();
    booklog_api::app(AppState::new(Arc::new(reading_log), TEST_HISTORY_LIMIT))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Save a book through the API and assert it was accepted.
pub async fn save_book(app: &Router, title: &str, author: &str, genre: &str, pages: &str) {
    let body = serde_json::json!({
        "title": title,
        "author": author,
        "genre": genre,
        "pages": pages,
    });
    let (status, json) = post_json(app.clone(), "/api/v1/books", &body).await;
    assert_eq!(status, StatusCode::OK, "save rejected: {json}");
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
