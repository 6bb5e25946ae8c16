//! Routes for the Home view: running totals and clearing the log.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use booklog_library::application::query_handlers::SummaryView;
use booklog_library::domain::commands::ClearReadingLog;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /summary
async fn get_summary(State(state): State<AppState>) -> Json<SummaryView> {
    let totals = state.reading_log.totals().await;
    Json(SummaryView::from(&totals))
}

/// POST /clear
#[instrument(skip(state))]
async fn clear(State(state): State<AppState>) -> Result<Json<SummaryView>, ApiError> {
    let command = ClearReadingLog {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling clear command");

    let cleared = state.reading_log.clear(&command).await?;

    Ok(Json(SummaryView::from(&cleared)))
}

/// Returns the router for the Home view.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/clear", post(clear))
}
