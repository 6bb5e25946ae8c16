//! Shared application state.

use std::sync::Arc;

use booklog_library::application::service::ReadingLog;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The reading log every view reads from and writes to.
    pub reading_log: Arc<ReadingLog>,
    /// Number of books the history view returns when no limit is given.
    pub history_limit: usize,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(reading_log: Arc<ReadingLog>, history_limit: usize) -> Self {
        Self {
            reading_log,
            history_limit,
        }
    }
}
