//! Persistence of the active LLM configuration.

use std::sync::Arc;

use crate::domain::llm::LlmConfig;
use crate::ports::{KeyValueStore, StorageError};

/// Stores at most one configuration under a fixed key.
#[derive(Clone)]
pub struct LlmConfigRepository {
    store: Arc<dyn KeyValueStore>,
}

impl LlmConfigRepository {
    pub const STORE_NAME: &'static str = "llm-configs";
    pub const CONFIG_KEY: &'static str = "current-config";

    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, config: &LlmConfig) -> Result<(), StorageError> {
        let value = serde_json::to_value(config)
            .map_err(|e| StorageError::serialization(self.store.name(), e))?;

        self.store.set(Self::CONFIG_KEY, value).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save LLM config");
            e
        })?;

        tracing::info!(provider = %config.provider(), model = config.model(), "LLM config saved");
        Ok(())
    }

    pub async fn get(&self) -> Result<Option<LlmConfig>, StorageError> {
        let value = self.store.get(Self::CONFIG_KEY).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to get LLM config");
            e
        })?;

        value
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    tracing::error!(error = %e, "Stored LLM config is malformed");
                    StorageError::deserialization(self.store.name(), e)
                })
            })
            .transpose()
    }

    pub async fn delete(&self) -> Result<(), StorageError> {
        self.store.remove(Self::CONFIG_KEY).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to delete LLM config");
            e
        })
    }

    /// Whether a usable configuration is stored. Read failures and malformed
    /// configurations count as absent.
    pub async fn exists(&self) -> bool {
        match self.get().await {
            Ok(config) => config.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to check LLM config");
                false
            }
        }
    }
}
