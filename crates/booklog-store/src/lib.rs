//! Booklog Store — durable `KeyValueStore` backed by SQLite.

pub mod schema;
pub mod sqlite_store;
