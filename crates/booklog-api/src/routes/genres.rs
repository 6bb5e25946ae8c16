//! Routes for the Genre Tally view and the genre picker.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use booklog_library::domain::book::Genre;
use booklog_library::domain::views::GenreCount;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for GET /genres.
#[derive(Debug, Serialize)]
pub struct GenreTallyResponse {
    /// One entry per distinct genre, in first-seen order.
    pub genres: Vec<GenreCount>,
}

/// Response body for GET /genres/catalog.
#[derive(Debug, Serialize)]
pub struct GenreCatalogResponse {
    /// Every genre a new book may be filed under.
    pub genres: Vec<&'static str>,
}

/// GET /genres
async fn get_tally(State(state): State<AppState>) -> Result<Json<GenreTallyResponse>, ApiError> {
    let genres = state.reading_log.genre_tally().await?;
    Ok(Json(GenreTallyResponse { genres }))
}

/// GET /genres/catalog
async fn get_catalog() -> Json<GenreCatalogResponse> {
    Json(GenreCatalogResponse {
        genres: Genre::ALL.iter().map(|genre| genre.as_str()).collect(),
    })
}

/// Returns the router for genre views.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(get_tally))
        .route("/genres/catalog", get(get_catalog))
}
