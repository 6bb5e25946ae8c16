//! Shared test stores and utilities for the booklog reading tracker.

mod store;

pub use store::{FailingStore, InMemoryStore, ReadOnlyStore};
