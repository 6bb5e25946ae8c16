//! Query handlers for the Reading Log context.
//!
//! This module contains query handlers that read the persisted book list
//! and totals and return read-only views.

use booklog_core::error::DomainError;
use booklog_core::store::KeyValueStore;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::storage;
use crate::domain::book::BookRecord;
use crate::domain::ledger::AggregateState;
use crate::domain::views::{self, GenreCount};

/// Read-only view of the running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Sum of pages over all saved books.
    pub total_pages_read: u64,
    /// Number of saved books.
    pub number_of_books: u64,
    /// Exact mean pages per book.
    pub average_pages: f64,
    /// Mean pages per book with two decimals.
    pub average_pages_display: String,
    /// The most recently saved book.
    pub last_book: Option<BookRecord>,
}

impl From<&AggregateState> for SummaryView {
    fn from(state: &AggregateState) -> Self {
        Self {
            total_pages_read: state.total_pages_read,
            number_of_books: state.number_of_books,
            average_pages: state.average_pages(),
            average_pages_display: state.average_pages_display(),
            last_book: state.last_book.clone(),
        }
    }
}

/// Loads the totals, reconciling them against the book list.
///
/// If the stored totals disagree with the list (or could not be decoded),
/// the totals derived from the list are written back and returned.
///
/// # Errors
///
/// Returns `DomainError::Storage` if a read or the repair write fails, or
/// `DomainError::CorruptEntry` if the book list is unreadable.
pub async fn load_aggregate(store: &dyn KeyValueStore) -> Result<AggregateState, DomainError> {
    let books = storage::read_books(store).await?;
    let stored = storage::read_aggregate(store).await?;

    let outcome = AggregateState::reconcile(&stored.state, &books);
    if outcome.repaired || !stored.malformed.is_empty() {
        warn!(
            stored_total = stored.state.total_pages_read,
            stored_count = stored.state.number_of_books,
            derived_total = outcome.state.total_pages_read,
            derived_count = outcome.state.number_of_books,
            malformed = ?stored.malformed,
            "stored totals disagree with book list; rewriting from book list"
        );
        store.apply(&storage::aggregate_ops(&outcome.state)?).await?;
    }

    info!(
        number_of_books = outcome.state.number_of_books,
        total_pages_read = outcome.state.total_pages_read,
        "reading log loaded"
    );
    Ok(outcome.state)
}

/// Returns the whole book list, newest first.
///
/// # Errors
///
/// Returns `DomainError::Storage` or `DomainError::CorruptEntry` if the list
/// cannot be read.
pub async fn get_books(store: &dyn KeyValueStore) -> Result<Vec<BookRecord>, DomainError> {
    storage::read_books(store).await
}

/// Returns up to `limit` of the most recently saved books, newest first.
///
/// # Errors
///
/// Returns `DomainError::Storage` or `DomainError::CorruptEntry` if the list
/// cannot be read.
pub async fn get_recent_books(
    store: &dyn KeyValueStore,
    limit: usize,
) -> Result<Vec<BookRecord>, DomainError> {
    let books = storage::read_books(store).await?;
    Ok(views::recent(&books, limit).to_vec())
}

/// Returns the number of books per genre.
///
/// # Errors
///
/// Returns `DomainError::Storage` or `DomainError::CorruptEntry` if the list
/// cannot be read.
pub async fn get_genre_tally(store: &dyn KeyValueStore) -> Result<Vec<GenreCount>, DomainError> {
    let books = storage::read_books(store).await?;
    Ok(views::tally(&books))
}
