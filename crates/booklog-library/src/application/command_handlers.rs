//! Command handlers for the Reading Log context.
//!
//! Each handler reads what it needs from the store, computes the new state,
//! and persists every affected key in a single atomic batch. Callers must
//! not run two handlers concurrently against the same store; `ReadingLog`
//! takes care of that.

use booklog_core::command::Command;
use booklog_core::error::DomainError;
use booklog_core::store::KeyValueStore;
use tracing::{error, info};

use crate::application::storage;
use crate::domain::book::{self, BookRecord};
use crate::domain::commands::{ClearReadingLog, SaveBook};
use crate::domain::ledger::AggregateState;

/// Result of a successfully saved book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBookResult {
    /// The validated record, now at the head of the book list.
    pub book: BookRecord,
    /// Totals after the save.
    pub state: AggregateState,
}

/// Handles the `SaveBook` command: validates the candidate, prepends it to
/// the book list and advances the totals from `current`, writing both in one
/// batch.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a rejected candidate,
/// `DomainError::CorruptEntry` if the stored list is unreadable, and
/// `DomainError::Storage` if reading or writing fails.
pub async fn handle_save_book(
    command: &SaveBook,
    current: &AggregateState,
    store: &dyn KeyValueStore,
) -> Result<SaveBookResult, DomainError> {
    let book = book::validate(&command.candidate)?;

    let mut books = storage::read_books(store).await?;
    books.insert(0, book.clone());
    let state = current.record(&book);

    let ops = storage::save_ops(&state, &books)?;
    store.apply(&ops).await.inspect_err(|e| {
        error!(
            command = %command.meta(),
            error = %e,
            "failed to persist saved book"
        );
    })?;

    info!(
        command = %command.meta(),
        title = %book.title,
        pages = book.pages,
        number_of_books = state.number_of_books,
        "book saved"
    );

    Ok(SaveBookResult { book, state })
}

/// Handles the `ClearReadingLog` command: removes the totals and the book
/// list in one batch.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the write fails.
pub async fn handle_clear(
    command: &ClearReadingLog,
    store: &dyn KeyValueStore,
) -> Result<AggregateState, DomainError> {
    store
        .apply(&storage::clear_ops())
        .await
        .inspect_err(|e| {
            error!(
                command = %command.meta(),
                error = %e,
                "failed to clear reading log"
            );
        })?;

    info!(command = %command.meta(), "reading log cleared");

    Ok(AggregateState::default())
}
