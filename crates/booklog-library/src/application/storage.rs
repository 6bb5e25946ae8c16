//! Persisted layout of the reading log.
//!
//! | Key              | Value                                  |
//! |------------------|----------------------------------------|
//! | `totalPagesRead` | decimal integer                        |
//! | `numberOfBooks`  | decimal integer                        |
//! | `lastBook`       | JSON `BookRecord`, absent when empty   |
//! | `books`          | JSON array of `BookRecord`, newest first |

use booklog_core::error::DomainError;
use booklog_core::store::{KeyValueStore, StoreOp};
use serde::Serialize;
use tracing::warn;

use crate::domain::book::BookRecord;
use crate::domain::ledger::AggregateState;

/// Key holding the running page total.
pub const TOTAL_PAGES_READ_KEY: &str = "totalPagesRead";
/// Key holding the running book count.
pub const NUMBER_OF_BOOKS_KEY: &str = "numberOfBooks";
/// Key holding the most recently saved book.
pub const LAST_BOOK_KEY: &str = "lastBook";
/// Key holding the whole book list.
pub const BOOKS_KEY: &str = "books";

/// Aggregate fields as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredAggregate {
    /// Decoded totals; undecodable fields fall back to their defaults.
    pub state: AggregateState,
    /// Keys whose value could not be decoded.
    pub malformed: Vec<&'static str>,
}

/// Reads the book list. An absent key is an empty list.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the read fails, or
/// `DomainError::CorruptEntry` if the value is not a JSON list of books.
pub async fn read_books(store: &dyn KeyValueStore) -> Result<Vec<BookRecord>, DomainError> {
    match store.get(BOOKS_KEY).await? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| DomainError::CorruptEntry {
            key: BOOKS_KEY.to_owned(),
            reason: e.to_string(),
        }),
    }
}

fn decode_counter(
    key: &'static str,
    raw: Option<String>,
    malformed: &mut Vec<&'static str>,
) -> u64 {
    let Some(raw) = raw else { return 0 };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, "ignoring undecodable counter");
        malformed.push(key);
        0
    })
}

/// Reads the three aggregate keys. Absent keys take their empty defaults.
///
/// # Errors
///
/// Returns `DomainError::Storage` if a read fails.
pub async fn read_aggregate(store: &dyn KeyValueStore) -> Result<StoredAggregate, DomainError> {
    let mut malformed = Vec::new();

    let total_pages_read = decode_counter(
        TOTAL_PAGES_READ_KEY,
        store.get(TOTAL_PAGES_READ_KEY).await?,
        &mut malformed,
    );
    let number_of_books = decode_counter(
        NUMBER_OF_BOOKS_KEY,
        store.get(NUMBER_OF_BOOKS_KEY).await?,
        &mut malformed,
    );
    let last_book = match store.get(LAST_BOOK_KEY).await? {
        None => None,
        Some(raw) => match serde_json::from_str::<Option<BookRecord>>(&raw) {
            Ok(book) => book,
            Err(e) => {
                warn!(key = LAST_BOOK_KEY, error = %e, "ignoring undecodable last book");
                malformed.push(LAST_BOOK_KEY);
                None
            }
        },
    };

    Ok(StoredAggregate {
        state: AggregateState {
            total_pages_read,
            number_of_books,
            last_book,
        },
        malformed,
    })
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::Storage(format!("failed to encode {key}: {e}")))
}

/// Writes that persist `state` over the three aggregate keys.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the last book cannot be encoded.
pub fn aggregate_ops(state: &AggregateState) -> Result<Vec<StoreOp>, DomainError> {
    let last_book = match &state.last_book {
        Some(book) => StoreOp::set(LAST_BOOK_KEY, encode(LAST_BOOK_KEY, book)?),
        None => StoreOp::remove(LAST_BOOK_KEY),
    };
    Ok(vec![
        StoreOp::set(TOTAL_PAGES_READ_KEY, state.total_pages_read.to_string()),
        StoreOp::set(NUMBER_OF_BOOKS_KEY, state.number_of_books.to_string()),
        last_book,
    ])
}

/// Writes that persist `state` and `books` together, as one batch.
///
/// # Errors
///
/// Returns `DomainError::Storage` if a value cannot be encoded.
pub fn save_ops(state: &AggregateState, books: &[BookRecord]) -> Result<Vec<StoreOp>, DomainError> {
    let mut ops = aggregate_ops(state)?;
    ops.push(StoreOp::set(BOOKS_KEY, encode(BOOKS_KEY, books)?));
    Ok(ops)
}

/// Writes that remove every reading-log key.
#[must_use]
pub fn clear_ops() -> Vec<StoreOp> {
    [TOTAL_PAGES_READ_KEY, NUMBER_OF_BOOKS_KEY, LAST_BOOK_KEY, BOOKS_KEY]
        .into_iter()
        .map(StoreOp::remove)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_test_support::InMemoryStore;

    fn dune() -> BookRecord {
        BookRecord {
            title: "Dune".into(),
            author: "Herbert".into(),
            genre: "Fiction".into(),
            pages: 412,
        }
    }

    #[tokio::test]
    async fn test_read_books_and_aggregate_default_when_keys_absent() {
        let store = InMemoryStore::new();

        let books = read_books(&store).await.unwrap();
        let stored = read_aggregate(&store).await.unwrap();

        assert!(books.is_empty());
        assert_eq!(stored, StoredAggregate::default());
    }

    #[tokio::test]
    async fn test_read_aggregate_decodes_legacy_text_pages() {
        // Arrange: older lists stored pages as the raw input string.
        let store = InMemoryStore::with_entries([
            (TOTAL_PAGES_READ_KEY, "412"),
            (NUMBER_OF_BOOKS_KEY, "1"),
            (
                LAST_BOOK_KEY,
                r#"{"title":"Dune","author":"Herbert","pages":"412","genre":"Fiction"}"#,
            ),
        ]);

        // Act
        let stored = read_aggregate(&store).await.unwrap();

        // Assert
        assert!(stored.malformed.is_empty());
        assert_eq!(stored.state.total_pages_read, 412);
        assert_eq!(stored.state.number_of_books, 1);
        assert_eq!(stored.state.last_book, Some(dune()));
    }

    #[tokio::test]
    async fn test_read_aggregate_flags_malformed_fields() {
        let store = InMemoryStore::with_entries([
            (TOTAL_PAGES_READ_KEY, "lots"),
            (NUMBER_OF_BOOKS_KEY, "2"),
            (LAST_BOOK_KEY, "{not json"),
        ]);

        let stored = read_aggregate(&store).await.unwrap();

        assert_eq!(stored.malformed, vec![TOTAL_PAGES_READ_KEY, LAST_BOOK_KEY]);
        assert_eq!(stored.state.total_pages_read, 0);
        assert_eq!(stored.state.number_of_books, 2);
        assert_eq!(stored.state.last_book, None);
    }

    #[tokio::test]
    async fn test_read_books_reports_corrupt_list() {
        let store = InMemoryStore::with_entries([(BOOKS_KEY, "[{\"title\":")]);

        let result = read_books(&store).await;

        match result {
            Err(DomainError::CorruptEntry { key, .. }) => assert_eq!(key, BOOKS_KEY),
            other => panic!("expected CorruptEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_save_ops_write_all_four_keys() {
        let state = AggregateState::default().record(&dune());

        let ops = save_ops(&state, &[dune()]).unwrap();

        let keys: Vec<&str> = ops.iter().map(StoreOp::key).collect();
        assert_eq!(
            keys,
            vec![TOTAL_PAGES_READ_KEY, NUMBER_OF_BOOKS_KEY, LAST_BOOK_KEY, BOOKS_KEY]
        );
        assert_eq!(ops[0], StoreOp::set(TOTAL_PAGES_READ_KEY, "412"));
        assert_eq!(ops[1], StoreOp::set(NUMBER_OF_BOOKS_KEY, "1"));
    }

    #[test]
    fn test_aggregate_ops_remove_last_book_when_empty() {
        let ops = aggregate_ops(&AggregateState::default()).unwrap();

        assert_eq!(ops[2], StoreOp::remove(LAST_BOOK_KEY));
    }
}
