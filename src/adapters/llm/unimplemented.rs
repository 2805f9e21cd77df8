//! Placeholder adapter for providers without an integration.

use async_trait::async_trait;

use super::ProviderApi;
use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse};
use crate::ports::LlmError;

/// Answers every call with `NotImplemented`.
#[derive(Debug, Clone, Copy)]
pub struct UnimplementedApi {
    provider: LlmProvider,
}

impl UnimplementedApi {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ProviderApi for UnimplementedApi {
    fn provider(&self) -> LlmProvider {
        self.provider
    }

    async fn send(&self, _config: &LlmConfig, _prompt: &LlmPrompt) -> Result<LlmResponse, LlmError> {
        Err(LlmError::NotImplemented(self.provider))
    }

    async fn validate_key(&self, _api_key: &str) -> Result<bool, LlmError> {
        Err(LlmError::NotImplemented(self.provider))
    }

    async fn list_models(&self, _api_key: &str) -> Result<Vec<String>, LlmError> {
        Err(LlmError::NotImplemented(self.provider))
    }
}
