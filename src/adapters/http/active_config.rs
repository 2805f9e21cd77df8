//! Resolution of the LLM configuration a request runs with.

use crate::adapters::repositories::LlmConfigRepository;
use crate::domain::llm::LlmConfig;
use crate::ports::{LlmError, StorageError};

use super::error::ApiResult;

/// The saved configuration, falling back to the server default.
#[derive(Clone)]
pub struct ActiveLlmConfig {
    repository: LlmConfigRepository,
    fallback: Option<LlmConfig>,
}

impl ActiveLlmConfig {
    pub fn new(repository: LlmConfigRepository, fallback: Option<LlmConfig>) -> Self {
        Self {
            repository,
            fallback,
        }
    }

    pub fn repository(&self) -> &LlmConfigRepository {
        &self.repository
    }

    pub async fn current(&self) -> Result<Option<LlmConfig>, StorageError> {
        Ok(self.repository.get().await?.or_else(|| self.fallback.clone()))
    }

    /// Like [`current`](Self::current), but a missing configuration is a
    /// missing API key.
    pub async fn require(&self) -> ApiResult<LlmConfig> {
        match self.current().await? {
            Some(config) => Ok(config),
            None => {
                tracing::warn!("No LLM configuration saved and no server default");
                Err(LlmError::MissingApiKey.into())
            }
        }
    }
}
