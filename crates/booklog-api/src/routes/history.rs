//! Routes for the History view.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use booklog_library::domain::book::BookRecord;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /history.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Maximum number of books to return; defaults to the configured limit.
    pub limit: Option<usize>,
}

/// Response body for GET /history.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// The limit that was applied.
    pub limit: usize,
    /// The most recently saved books, newest first.
    pub books: Vec<BookRecord>,
}

/// GET /history
async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = params.limit.unwrap_or(state.history_limit);
    let books = state.reading_log.recent(limit).await?;
    Ok(Json(HistoryResponse { limit, books }))
}

/// Returns the router for the History view.
pub fn router() -> Router<AppState> {
    Router::new().route("/history", get(get_history))
}
