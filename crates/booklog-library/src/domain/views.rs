//! Read-only views derived from the book list.

use std::collections::HashMap;

use serde::Serialize;

use super::book::BookRecord;

/// Number of books filed under one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    /// Genre name, exactly as stored.
    pub genre: String,
    /// Books with that genre.
    pub count: usize,
}

/// Groups `books` by exact (case-sensitive) genre string.
///
/// Entries come out in the order each genre is first seen while walking the
/// list, so the same list always yields the same tally.
#[must_use]
pub fn tally(books: &[BookRecord]) -> Vec<GenreCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<GenreCount> = Vec::new();

    for book in books {
        if let Some(&index) = positions.get(book.genre.as_str()) {
            counts[index].count += 1;
        } else {
            positions.insert(&book.genre, counts.len());
            counts.push(GenreCount {
                genre: book.genre.clone(),
                count: 1,
            });
        }
    }

    counts
}

/// The first `n` entries of a newest-first list, or all of them if fewer.
#[must_use]
pub fn recent(books: &[BookRecord], n: usize) -> &[BookRecord] {
    &books[..n.min(books.len())]
}
