//! Repositories for label → description pairs (ubiquitous language terms
//! and use cases).

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{TermName, UseCase};
use crate::ports::{KeyValueStore, StorageError};

/// Label type stored as a glossary key.
pub trait GlossaryKey: From<String> + AsRef<str> + Send + Sync {
    const STORE_NAME: &'static str;
}

impl GlossaryKey for TermName {
    const STORE_NAME: &'static str = "ubiquitousLanguage";
}

impl GlossaryKey for UseCase {
    const STORE_NAME: &'static str = "useCases";
}

/// Stores a textual definition per key.
pub struct GlossaryRepository<K> {
    store: Arc<dyn KeyValueStore>,
    _key: PhantomData<fn() -> K>,
}

pub type TermRepository = GlossaryRepository<TermName>;
pub type UseCaseRepository = GlossaryRepository<UseCase>;

impl<K> Clone for GlossaryRepository<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _key: PhantomData,
        }
    }
}

impl<K: GlossaryKey> GlossaryRepository<K> {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _key: PhantomData,
        }
    }

    pub async fn save(&self, key: &K, definition: &str) -> Result<(), StorageError> {
        self.store
            .set(key.as_ref(), Value::String(definition.to_string()))
            .await
            .map_err(|e| {
                tracing::error!(store = self.store.name(), key = key.as_ref(), error = %e, "Failed to save definition");
                e
            })
    }

    pub async fn get(&self, key: &K) -> Result<Option<String>, StorageError> {
        let value = self.store.get(key.as_ref()).await.map_err(|e| {
            tracing::error!(store = self.store.name(), key = key.as_ref(), error = %e, "Failed to read definition");
            e
        })?;

        value.map(|value| self.definition(value)).transpose()
    }

    /// All stored keys, in store order.
    pub async fn list(&self) -> Result<Vec<K>, StorageError> {
        let entries = self.store.entries().await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to list keys");
            e
        })?;

        Ok(entries.into_iter().map(|(key, _)| K::from(key)).collect())
    }

    /// Keys paired with their definitions, in store order.
    pub async fn entries(&self) -> Result<Vec<(K, String)>, StorageError> {
        let entries = self.store.entries().await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to list definitions");
            e
        })?;

        entries
            .into_iter()
            .map(|(key, value)| Ok((K::from(key), self.definition(value)?)))
            .collect()
    }

    pub async fn delete(&self, key: &K) -> Result<(), StorageError> {
        self.store.remove(key.as_ref()).await.map_err(|e| {
            tracing::error!(store = self.store.name(), key = key.as_ref(), error = %e, "Failed to delete definition");
            e
        })
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.clear().await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to clear store");
            e
        })
    }

    fn definition(&self, value: Value) -> Result<String, StorageError> {
        match value {
            Value::String(definition) => Ok(definition),
            other => {
                tracing::error!(store = self.store.name(), "Stored definition is not a string");
                Err(StorageError::deserialization(
                    self.store.name(),
                    format!("expected string, found {}", other),
                ))
            }
        }
    }
}
