//! Routes for adding books and listing the full book list.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use booklog_library::application::query_handlers::SummaryView;
use booklog_library::domain::book::{BookCandidate, BookRecord};
use booklog_library::domain::commands::SaveBook;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned after a book is saved.
#[derive(Debug, Serialize)]
pub struct SaveBookResponse {
    /// The validated record as stored.
    pub book: BookRecord,
    /// Totals after the save.
    pub summary: SummaryView,
}

/// Response body for the full book list.
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    /// Every saved book, newest first.
    pub books: Vec<BookRecord>,
}

/// POST /books
#[instrument(skip(state, candidate), fields(title = ?candidate.title))]
async fn save_book(
    State(state): State<AppState>,
    Json(candidate): Json<BookCandidate>,
) -> Result<Json<SaveBookResponse>, ApiError> {
    let command = SaveBook {
        correlation_id: Uuid::new_v4(),
        candidate,
    };

    info!(correlation_id = %command.correlation_id, "handling save_book command");

    let result = state.reading_log.save_book(&command).await?;

    Ok(Json(SaveBookResponse {
        summary: SummaryView::from(&result.state),
        book: result.book,
    }))
}

/// GET /books
async fn list_books(State(state): State<AppState>) -> Result<Json<BookListResponse>, ApiError> {
    let books = state.reading_log.books().await?;
    Ok(Json(BookListResponse { books }))
}

/// Returns the router for the book list.
pub fn router() -> Router<AppState> {
    Router::new().route("/books", get(list_books).post(save_book))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use booklog_core::store::KeyValueStore;
    use booklog_library::application::service::ReadingLog;
    use booklog_test_support::{InMemoryStore, ReadOnlyStore};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app_with(store: Arc<dyn KeyValueStore>) -> Router {
        let reading_log = Arc::new(ReadingLog::open(store).await.unwrap());
        router().with_state(AppState::new(reading_log, 3))
    }

    fn post_book(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/books")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_save_book_returns_200_with_book_and_summary() {
        // Arrange
        let app = app_with(Arc::new(InMemoryStore::new())).await;
        let body = serde_json::json!({
            "title": "Dune",
            "author": "Herbert",
            "genre": "Fiction",
            "pages": "412"
        });

        // Act
        let response = app.oneshot(post_book(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["book"]["title"], "Dune");
        assert_eq!(json["book"]["pages"], 412);
        assert_eq!(json["summary"]["total_pages_read"], 412);
        assert_eq!(json["summary"]["number_of_books"], 1);
        assert_eq!(json["summary"]["last_book"]["title"], "Dune");
    }

    #[tokio::test]
    async fn test_save_book_accepts_numeric_pages_and_defaults_genre() {
        let app = app_with(Arc::new(InMemoryStore::new())).await;
        let body = serde_json::json!({ "title": "T", "author": "A", "pages": 250 });

        let response = app.oneshot(post_book(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["book"]["pages"], 250);
        assert_eq!(json["book"]["genre"], "Unknown");
    }

    #[tokio::test]
    async fn test_save_book_returns_400_for_missing_title() {
        let store = Arc::new(InMemoryStore::new());
        let app = app_with(store.clone()).await;
        let body = serde_json::json!({ "title": "", "author": "A", "pages": "10" });

        let response = app.oneshot(post_book(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().contains("title"));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_save_book_returns_400_for_negative_pages() {
        let app = app_with(Arc::new(InMemoryStore::new())).await;
        let body = serde_json::json!({ "title": "T", "author": "A", "pages": "-5" });

        let response = app.oneshot(post_book(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_save_book_returns_422_for_malformed_body() {
        let app = app_with(Arc::new(InMemoryStore::new())).await;
        let body = serde_json::json!({ "title": ["not", "a", "string"] });

        let response = app.oneshot(post_book(&body)).await.unwrap();

        // Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_save_book_returns_500_when_store_rejects_writes() {
        let app = app_with(Arc::new(ReadOnlyStore::with_entries([("numberOfBooks", "0")]))).await;
        let body = serde_json::json!({ "title": "T", "author": "A", "pages": "10" });

        let response = app.oneshot(post_book(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "storage_error");
    }

    #[tokio::test]
    async fn test_list_books_returns_newest_first() {
        // Arrange
        let app = app_with(Arc::new(InMemoryStore::new())).await;
        for title in ["First", "Second"] {
            let body = serde_json::json!({ "title": title, "author": "A", "pages": "10" });
            let response = app.clone().oneshot(post_book(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let request = Request::builder()
            .method("GET")
            .uri("/books")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let titles: Vec<&str> = json["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_list_books_returns_500_for_corrupt_list() {
        // Arrange: corrupt the list after the log has been opened.
        let store = Arc::new(InMemoryStore::new());
        let app = app_with(store.clone()).await;
        store.set("books", "{oops").await.unwrap();

        let request = Request::builder()
            .method("GET")
            .uri("/books")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "corrupt_entry");
    }
}
