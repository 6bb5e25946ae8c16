//! Booklog — Reading Log bounded context.
//!
//! Responsible for validating finished books, keeping the running totals
//! (pages, book count, last book) consistent with the persisted book list,
//! and deriving the history and genre views.

pub mod application;
pub mod domain;
