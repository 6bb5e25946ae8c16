//! The aggregate ledger: running totals cached next to the book list.

use serde::Serialize;

use super::book::BookRecord;

/// Running totals over every book saved since the last clear.
///
/// Redundant with the book list; kept so reads never have to sum the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateState {
    /// Sum of `pages` over all saved books.
    pub total_pages_read: u64,
    /// Number of saved books.
    pub number_of_books: u64,
    /// The most recently saved book.
    pub last_book: Option<BookRecord>,
}

/// Outcome of comparing stored totals against the book list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Totals derived from the book list.
    pub state: AggregateState,
    /// Whether the stored totals disagreed and must be rewritten.
    pub repaired: bool,
}

impl AggregateState {
    /// Returns the totals after saving `book`.
    #[must_use]
    pub fn record(&self, book: &BookRecord) -> Self {
        Self {
            total_pages_read: self.total_pages_read + u64::from(book.pages),
            number_of_books: self.number_of_books + 1,
            last_book: Some(book.clone()),
        }
    }

    /// Derives the totals from a newest-first book list.
    #[must_use]
    pub fn from_books(books: &[BookRecord]) -> Self {
        Self {
            total_pages_read: books.iter().map(|b| u64::from(b.pages)).sum(),
            number_of_books: books.len() as u64,
            last_book: books.first().cloned(),
        }
    }

    /// Checks `stored` against `books`. The book list always wins.
    #[must_use]
    pub fn reconcile(stored: &Self, books: &[BookRecord]) -> Reconciliation {
        let derived = Self::from_books(books);
        let repaired = *stored != derived;
        Reconciliation {
            state: derived,
            repaired,
        }
    }

    /// Mean pages per book, or `0.0` when no book has been saved.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_pages(&self) -> f64 {
        if self.number_of_books == 0 {
            return 0.0;
        }
        self.total_pages_read as f64 / self.number_of_books as f64
    }

    /// `average_pages` rendered with two decimals.
    #[must_use]
    pub fn average_pages_display(&self) -> String {
        format!("{:.2}", self.average_pages())
    }

    /// Whether nothing has been saved since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.number_of_books == 0
    }
}
