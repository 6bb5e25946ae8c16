//! Key-value store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// A single write in a batch passed to [`KeyValueStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Insert or overwrite `key` with `value`.
    Set {
        /// Entry key.
        key: String,
        /// New value.
        value: String,
    },
    /// Delete `key`. Removing an absent key is not an error.
    Remove {
        /// Entry key.
        key: String,
    },
}

impl StoreOp {
    /// Builds a `Set` operation.
    #[must_use]
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Builds a `Remove` operation.
    #[must_use]
    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    /// The key this operation touches.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// Durable string-keyed, string-valued storage.
///
/// Values survive process restarts. Implementations do not coordinate
/// concurrent callers beyond what `apply` guarantees; serializing
/// read-modify-write sequences is the caller's job.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deletes `key`. Succeeds if the key was already absent.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;

    /// Applies every operation in `ops` atomically: either all of them are
    /// visible afterwards or none is.
    async fn apply(&self, ops: &[StoreOp]) -> Result<(), DomainError>;
}
