//! `SQLite` implementation of the `KeyValueStore` trait.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use booklog_core::error::DomainError;
use booklog_core::store::{KeyValueStore, StoreOp};

use crate::schema;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}

/// SQLite-backed key-value store.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Connects to the database at `url` (for example
    /// `sqlite://booklog.db?mode=rwc`), creating the file and the entries
    /// table when missing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the URL is invalid, the database
    /// cannot be opened, or the schema cannot be created.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_error)?
            .create_if_missing(true);
        Self::connect_with(options, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Opens (or creates) a database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the file cannot be opened or the
    /// schema cannot be created.
    pub async fn open_file(path: &Path) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Opens a private in-memory database. Contents are lost when the store
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the schema cannot be created.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(storage_error)?;
        // Every in-memory connection is its own database, so the pool must
        // hold exactly one connection for its whole lifetime.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(storage_error)?;
        Self::from_pool(pool).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, DomainError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(storage_error)?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the entries table if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the schema cannot be created.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, DomainError> {
        sqlx::query(schema::CREATE_ENTRIES_TABLE)
            .execute(&pool)
            .await
            .map_err(storage_error)?;
        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar::<_, String>(schema::SELECT_ENTRY)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(schema::UPSERT_ENTRY)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query(schema::DELETE_ENTRY)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn apply(&self, ops: &[StoreOp]) -> Result<(), DomainError> {
        // Dropping an uncommitted transaction rolls it back.
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        for op in ops {
            match op {
                StoreOp::Set { key, value } => sqlx::query(schema::UPSERT_ENTRY)
                    .bind(key.as_str())
                    .bind(value.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error)?,
                StoreOp::Remove { key } => sqlx::query(schema::DELETE_ENTRY)
                    .bind(key.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error)?,
            };
        }
        tx.commit().await.map_err(storage_error)?;
        debug!(ops = ops.len(), "applied store batch");
        Ok(())
    }
}
