//! Route modules, one per view of the reading log.

pub mod books;
pub mod genres;
pub mod health;
pub mod history;
pub mod summary;
