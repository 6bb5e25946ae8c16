//! HTTP surface for the book reading log.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::summary::router())
        .merge(routes::books::router())
        .merge(routes::history::router())
        .merge(routes::genres::router());

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
