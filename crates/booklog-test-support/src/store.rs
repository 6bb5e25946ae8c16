//! Mock `KeyValueStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use booklog_core::error::DomainError;
use booklog_core::store::{KeyValueStore, StoreOp};

/// A fully working store backed by a `BTreeMap`. Records every batch passed
/// to `apply` so tests can assert on what was written.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    applied: Mutex<Vec<Vec<StoreOp>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the current contents.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap().clone()
    }

    /// Returns every batch that was passed to `apply`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn applied_batches(&self) -> Vec<Vec<StoreOp>> {
        self.applied.lock().unwrap().clone()
    }
}

fn apply_op(entries: &mut BTreeMap<String, String>, op: &StoreOp) {
    match op {
        StoreOp::Set { key, value } => {
            entries.insert(key.clone(), value.clone());
        }
        StoreOp::Remove { key } => {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn apply(&self, ops: &[StoreOp]) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().unwrap();
        for op in ops {
            apply_op(&mut entries, op);
        }
        self.applied.lock().unwrap().push(ops.to_vec());
        Ok(())
    }
}

/// A store whose every call returns a storage error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }

    async fn apply(&self, _ops: &[StoreOp]) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }
}

/// A store that serves reads from fixed entries and rejects every write.
/// Used to check that a failed write leaves no partial state behind.
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    inner: InMemoryStore,
}

impl ReadOnlyStore {
    /// Create a read-only store over `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: InMemoryStore::with_entries(entries),
        }
    }

    /// Returns a snapshot of the (unchanging) contents.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.snapshot()
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("store is read-only".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("store is read-only".into()))
    }

    async fn apply(&self, _ops: &[StoreOp]) -> Result<(), DomainError> {
        Err(DomainError::Storage("store is read-only".into()))
    }
}
