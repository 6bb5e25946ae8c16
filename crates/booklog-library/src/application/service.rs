//! The `ReadingLog` service: one shared handle over the store and the cached
//! totals.

use std::fmt;
use std::sync::Arc;

use booklog_core::error::DomainError;
use booklog_core::store::KeyValueStore;
use tokio::sync::Mutex;

use crate::application::command_handlers::{self, SaveBookResult};
use crate::application::query_handlers;
use crate::domain::book::BookRecord;
use crate::domain::commands::{ClearReadingLog, SaveBook};
use crate::domain::ledger::AggregateState;
use crate::domain::views::GenreCount;

/// Owns the store handle and the in-memory copy of the totals.
///
/// Built once with [`ReadingLog::open`] and then shared. Save and clear hold
/// the cache lock for their whole read-compute-write sequence, so they never
/// interleave. Derived views read the book list straight from the store.
pub struct ReadingLog {
    store: Arc<dyn KeyValueStore>,
    totals: Mutex<AggregateState>,
}

impl fmt::Debug for ReadingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingLog").finish_non_exhaustive()
    }
}

impl ReadingLog {
    /// Loads (and if needed repairs) the totals from `store`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the store cannot be read or repaired.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, DomainError> {
        let totals = query_handlers::load_aggregate(store.as_ref()).await?;
        Ok(Self {
            store,
            totals: Mutex::new(totals),
        })
    }

    /// Current totals.
    pub async fn totals(&self) -> AggregateState {
        self.totals.lock().await.clone()
    }

    /// Validates and saves a book. The cache only advances once the write
    /// has succeeded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a rejected candidate, or a
    /// storage error if persisting fails.
    pub async fn save_book(&self, command: &SaveBook) -> Result<SaveBookResult, DomainError> {
        let mut totals = self.totals.lock().await;
        let result =
            command_handlers::handle_save_book(command, &totals, self.store.as_ref()).await?;
        *totals = result.state.clone();
        Ok(result)
    }

    /// Resets the totals and empties the book list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the write fails; the cache is then
    /// left as it was.
    pub async fn clear(&self, command: &ClearReadingLog) -> Result<AggregateState, DomainError> {
        let mut totals = self.totals.lock().await;
        let cleared = command_handlers::handle_clear(command, self.store.as_ref()).await?;
        *totals = cleared.clone();
        Ok(cleared)
    }

    /// Every saved book, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the list cannot be read.
    pub async fn books(&self) -> Result<Vec<BookRecord>, DomainError> {
        query_handlers::get_books(self.store.as_ref()).await
    }

    /// Up to `limit` most recent books.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the list cannot be read.
    pub async fn recent(&self, limit: usize) -> Result<Vec<BookRecord>, DomainError> {
        query_handlers::get_recent_books(self.store.as_ref(), limit).await
    }

    /// Books per genre.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the list cannot be read.
    pub async fn genre_tally(&self) -> Result<Vec<GenreCount>, DomainError> {
        query_handlers::get_genre_tally(self.store.as_ref()).await
    }
}
