//! Book reading log API server entry point.

use std::sync::Arc;

use booklog_api::config::AppConfig;
use booklog_api::error::AppError;
use booklog_api::state::AppState;
use booklog_library::application::service::ReadingLog;
use booklog_store::sqlite_store::SqliteKeyValueStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting book reading log API server");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;

    let store = SqliteKeyValueStore::connect(&config.database_url).await?;
    let reading_log = ReadingLog::open(Arc::new(store)).await?;

    let app = booklog_api::app(AppState::new(
        Arc::new(reading_log),
        config.history_limit,
    ));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
