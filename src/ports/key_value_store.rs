//! KeyValueStore port - string blobs addressed by key.
//!
//! The account directory, the current session and saved profiles are all
//! JSON blobs stored through this port.

use async_trait::async_trait;

/// Errors that can occur during key-value operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for a flat key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removes `key`. Returns true if a value was present.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
