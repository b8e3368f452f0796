use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage key under which the bearer credential is persisted.
pub const CREDENTIAL_KEY: &str = "token";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A persisted string value with the time it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStateEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Durable client-side key/value storage (the desktop stand-in for browser local storage).
#[async_trait]
pub trait ClientStateRepository: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_entry(&self, key: &str) -> Result<Option<ClientStateEntry>, StorageError>;

    /// Insert or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_entry(&self, key: &str, entry: &ClientStateEntry) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_entry(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, ClientStateEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStateRepository for InMemoryRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<ClientStateEntry>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_entry(&self, key: &str, entry: &ClientStateEntry) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), entry.clone());
        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub client_state: Arc<dyn ClientStateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let client_state: Arc<dyn ClientStateRepository> = Arc::new(InMemoryRepository::new());
        Self { client_state }
    }
}
