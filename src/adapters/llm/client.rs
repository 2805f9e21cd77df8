//! Provider-dispatching LLM client.
//!
//! # Configuration
//!
//! ```ignore
//! let client = LlmClient::new(
//!     LlmClientConfig::default().with_timeout(Duration::from_secs(120)),
//! )?;
//! let response = client.send_prompt(&config, &prompt).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{
    AnthropicApi, OpenAiApi, ProviderApi, UnimplementedApi, DEFAULT_ANTHROPIC_BASE_URL,
    DEFAULT_OPENAI_BASE_URL,
};
use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse};
use crate::ports::{LlmError, LlmGateway};

/// Settings shared by every provider adapter.
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub anthropic_base_url: String,
    pub openai_base_url: String,
    /// Upper bound on a single provider call; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl LlmClientConfig {
    pub fn with_anthropic_base_url(mut self, url: impl Into<String>) -> Self {
        self.anthropic_base_url = url.into();
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Routes each call to the adapter for the requested provider.
pub struct LlmClient {
    anthropic: AnthropicApi,
    openai: OpenAiApi,
    google: UnimplementedApi,
    mistral: UnimplementedApi,
}

impl LlmClient {
    /// Creates a client sharing one HTTP connection pool across providers.
    pub fn new(config: LlmClientConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            anthropic: AnthropicApi::new(http.clone(), config.anthropic_base_url),
            openai: OpenAiApi::new(http, config.openai_base_url),
            google: UnimplementedApi::new(LlmProvider::Google),
            mistral: UnimplementedApi::new(LlmProvider::Mistral),
        })
    }

    fn api(&self, provider: LlmProvider) -> &dyn ProviderApi {
        match provider {
            LlmProvider::Anthropic => &self.anthropic,
            LlmProvider::OpenAI => &self.openai,
            LlmProvider::Google => &self.google,
            LlmProvider::Mistral => &self.mistral,
        }
    }

    /// Resolves the adapter for a key-only call, or explains why there is none.
    fn api_for_key_call(&self, provider: &str, api_key: &str) -> Option<&dyn ProviderApi> {
        if api_key.is_empty() {
            tracing::warn!(provider, "Empty API key");
            return None;
        }
        match provider.parse::<LlmProvider>() {
            Ok(provider) => Some(self.api(provider)),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot resolve provider");
                None
            }
        }
    }
}

#[async_trait]
impl LlmGateway for LlmClient {
    async fn send_prompt(
        &self,
        config: &LlmConfig,
        prompt: &LlmPrompt,
    ) -> Result<LlmResponse, LlmError> {
        if config.api_key().is_empty() {
            tracing::error!("Error sending prompt to LLM: API key is required");
            return Err(LlmError::MissingApiKey);
        }

        tracing::debug!(
            provider = %config.provider(),
            model = config.model(),
            examples = prompt.examples().len(),
            "Sending prompt"
        );

        let api = self.api(config.provider());
        api.send(config, prompt).await.map_err(|e| {
            tracing::error!(provider = %api.provider(), error = %e, "Error sending prompt to LLM");
            e
        })
    }

    async fn validate_api_key(&self, provider: &str, api_key: &str) -> bool {
        let Some(api) = self.api_for_key_call(provider, api_key) else {
            return false;
        };

        match api.validate_key(api_key).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(provider = %api.provider(), error = %e, "Error validating API key");
                false
            }
        }
    }

    async fn get_available_models(&self, provider: &str, api_key: &str) -> Vec<String> {
        let Some(api) = self.api_for_key_call(provider, api_key) else {
            return Vec::new();
        };

        match api.list_models(api_key).await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(provider = %api.provider(), error = %e, "Error fetching available models");
                Vec::new()
            }
        }
    }
}
