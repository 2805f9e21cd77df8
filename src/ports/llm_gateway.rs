//! LLM Gateway Port - Interface for sending prompts to a configured provider.
//!
//! The gateway hides which vendor answers a prompt. Callers hand it an
//! [`LlmConfig`] and an [`LlmPrompt`] and get back a normalized
//! [`LlmResponse`].

use async_trait::async_trait;

use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse};

/// LLM call errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    /// Config carried an empty API key.
    #[error("API key is required")]
    MissingApiKey,

    /// Known vendor without an integration.
    #[error("{} API integration not implemented yet", .0.display_name())]
    NotImplemented(LlmProvider),

    /// Provider answered with a non-success status.
    #[error("{} API error: {message}", .provider.display_name())]
    Provider {
        provider: LlmProvider,
        message: String,
    },

    /// Request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// Success body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LlmError {
    pub fn provider(provider: LlmProvider, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

/// Port for LLM interactions.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Sends one prompt to the provider named in `config`.
    ///
    /// # Errors
    ///
    /// - `MissingApiKey` if the config carries an empty key
    /// - `NotImplemented` for providers without an integration
    /// - `Provider` when the vendor rejects the request
    /// - `Network` / `Parse` for transport and body failures
    async fn send_prompt(
        &self,
        config: &LlmConfig,
        prompt: &LlmPrompt,
    ) -> Result<LlmResponse, LlmError>;

    /// Returns true iff the provider accepts the key. Never fails.
    async fn validate_api_key(&self, provider: &str, api_key: &str) -> bool;

    /// Lists the models the key can use. Empty on any failure.
    async fn get_available_models(&self, provider: &str, api_key: &str) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_uses_display_name() {
        let err = LlmError::provider(LlmProvider::OpenAI, "Invalid API key");
        assert_eq!(err.to_string(), "OpenAI API error: Invalid API key");

        let err = LlmError::provider(LlmProvider::Anthropic, "Unknown error");
        assert_eq!(err.to_string(), "Anthropic API error: Unknown error");
    }

    #[test]
    fn not_implemented_names_provider() {
        assert_eq!(
            LlmError::NotImplemented(LlmProvider::Google).to_string(),
            "Google API integration not implemented yet"
        );
        assert_eq!(
            LlmError::NotImplemented(LlmProvider::Mistral).to_string(),
            "Mistral API integration not implemented yet"
        );
    }

    #[test]
    fn missing_key_message() {
        assert_eq!(LlmError::MissingApiKey.to_string(), "API key is required");
    }
}
