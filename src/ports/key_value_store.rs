//! Key-Value Store Port - Interface for named document stores.
//!
//! Each store instance is one isolated namespace (e.g. `entities`), holding
//! JSON documents under string keys. Repositories wrap one instance each.

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read from store '{store}': {message}")]
    Read { store: String, message: String },

    #[error("Failed to write to store '{store}': {message}")]
    Write { store: String, message: String },

    #[error("Failed to serialize value for store '{store}': {message}")]
    Serialization { store: String, message: String },

    #[error("Failed to deserialize value from store '{store}': {message}")]
    Deserialization { store: String, message: String },
}

impl StorageError {
    pub fn read(store: impl Into<String>, message: impl ToString) -> Self {
        Self::Read {
            store: store.into(),
            message: message.to_string(),
        }
    }

    pub fn write(store: impl Into<String>, message: impl ToString) -> Self {
        Self::Write {
            store: store.into(),
            message: message.to_string(),
        }
    }

    pub fn serialization(store: impl Into<String>, message: impl ToString) -> Self {
        Self::Serialization {
            store: store.into(),
            message: message.to_string(),
        }
    }

    pub fn deserialization(store: impl Into<String>, message: impl ToString) -> Self {
        Self::Deserialization {
            store: store.into(),
            message: message.to_string(),
        }
    }
}

/// Port for one named key-value store.
///
/// Writes to a single store are serialized by the implementation. Iteration
/// order is ascending key order.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Name of this store instance.
    fn name(&self) -> &str;

    /// Reads the document under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Inserts or replaces the document under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every entry of this store.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Returns all entries in key order.
    async fn entries(&self) -> Result<Vec<(String, Value)>, StorageError>;
}
