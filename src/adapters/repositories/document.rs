//! Generic repository for JSON documents kept in one named store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::foundation::{AggregateName, CommandName, EntityId, EventName, ValueObjectName};
use crate::domain::modeling::{Aggregate, Command, Entity, Event, ValueObject};
use crate::ports::{KeyValueStore, StorageError};

/// A modeling artifact persisted under a key derived from itself.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    type Key: fmt::Display + Send + Sync;

    /// Name of the store holding this kind of document.
    const STORE_NAME: &'static str;

    fn key(&self) -> Self::Key;
}

impl Document for Entity {
    type Key = EntityId;
    const STORE_NAME: &'static str = "entities";

    fn key(&self) -> EntityId {
        self.id.clone()
    }
}

impl Document for ValueObject {
    type Key = ValueObjectName;
    const STORE_NAME: &'static str = "valueObjects";

    fn key(&self) -> ValueObjectName {
        self.name.clone()
    }
}

impl Document for Aggregate {
    type Key = AggregateName;
    const STORE_NAME: &'static str = "aggregates";

    fn key(&self) -> AggregateName {
        self.name.clone()
    }
}

impl Document for Event {
    type Key = EventName;
    const STORE_NAME: &'static str = "events";

    fn key(&self) -> EventName {
        self.name.clone()
    }
}

impl Document for Command {
    type Key = CommandName;
    const STORE_NAME: &'static str = "commands";

    fn key(&self) -> CommandName {
        self.name.clone()
    }
}

/// CRUD over one store of `T` documents.
pub struct DocumentRepository<T> {
    store: Arc<dyn KeyValueStore>,
    _document: PhantomData<fn() -> T>,
}

pub type EntityRepository = DocumentRepository<Entity>;
pub type ValueObjectRepository = DocumentRepository<ValueObject>;
pub type AggregateRepository = DocumentRepository<Aggregate>;
pub type EventRepository = DocumentRepository<Event>;
pub type CommandRepository = DocumentRepository<Command>;

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _document: PhantomData,
        }
    }
}

impl<T: Document> DocumentRepository<T> {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _document: PhantomData,
        }
    }

    /// Inserts or replaces `item` under its own key.
    pub async fn save(&self, item: &T) -> Result<(), StorageError> {
        let key = item.key().to_string();
        let result = match serde_json::to_value(item) {
            Ok(value) => self.store.set(&key, value).await,
            Err(e) => Err(StorageError::serialization(self.store.name(), e)),
        };
        result.map_err(|e| {
            tracing::error!(store = self.store.name(), key = %key, error = %e, "Failed to save document");
            e
        })
    }

    pub async fn get(&self, key: &T::Key) -> Result<Option<T>, StorageError> {
        let key = key.to_string();
        let value = self.store.get(&key).await.map_err(|e| {
            tracing::error!(store = self.store.name(), key = %key, error = %e, "Failed to read document");
            e
        })?;

        value.map(|value| self.decode(value)).transpose()
    }

    /// All documents in store order.
    pub async fn list(&self) -> Result<Vec<T>, StorageError> {
        let entries = self.store.entries().await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to list documents");
            e
        })?;

        entries
            .into_iter()
            .map(|(_, value)| self.decode(value))
            .collect()
    }

    /// Removes the document under `key`; absent keys are ignored.
    pub async fn delete(&self, key: &T::Key) -> Result<(), StorageError> {
        let key = key.to_string();
        self.store.remove(&key).await.map_err(|e| {
            tracing::error!(store = self.store.name(), key = %key, error = %e, "Failed to delete document");
            e
        })
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.clear().await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to clear store");
            e
        })
    }

    fn decode(&self, value: serde_json::Value) -> Result<T, StorageError> {
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Stored document is malformed");
            StorageError::deserialization(self.store.name(), e)
        })
    }
}
