//! Anthropic Messages API adapter.
//!
//! # Configuration
//!
//! ```ignore
//! let api = AnthropicApi::new(client, "https://api.anthropic.com");
//! let response = api.send(&config, &prompt).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{error_message, transport_error, ChatMessage, ProviderApi};
use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse, TokenUsage};
use crate::ports::LlmError;

/// Default Anthropic API origin.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Calls Anthropic's Messages and Models endpoints.
#[derive(Debug, Clone)]
pub struct AnthropicApi {
    client: Client,
    base_url: String,
}

impl AnthropicApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Builds the models endpoint URL.
    fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url)
    }

    /// Converts a prompt to Anthropic's format.
    ///
    /// The system prompt travels outside the message list; few-shot examples
    /// become alternating user/assistant turns ahead of the final user turn.
    fn to_anthropic_request<'a>(
        &self,
        config: &'a LlmConfig,
        prompt: &'a LlmPrompt,
    ) -> AnthropicRequest<'a> {
        let mut messages = Vec::with_capacity(prompt.examples().len() * 2 + 1);
        for example in prompt.examples() {
            messages.push(ChatMessage::user(&example.user_prompt));
            messages.push(ChatMessage::assistant(&example.assistant_response));
        }
        messages.push(ChatMessage::user(prompt.user_prompt()));

        AnthropicRequest {
            model: config.model(),
            system: prompt.system_prompt(),
            messages,
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        }
    }

    async fn get_models(&self, api_key: &str) -> Result<Response, LlmError> {
        self.client
            .get(self.models_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl ProviderApi for AnthropicApi {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Anthropic
    }

    async fn send(&self, config: &LlmConfig, prompt: &LlmPrompt) -> Result<LlmResponse, LlmError> {
        let request = self.to_anthropic_request(config, prompt);

        let response = self
            .client
            .post(self.messages_url())
            .header("Content-Type", "application/json")
            .header("x-api-key", config.api_key().expose())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::provider(
                LlmProvider::Anthropic,
                error_message(&body),
            ));
        }

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse response: {}", e)))?;

        let content = body
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| LlmError::Parse("Response contained no text content".to_string()))?;

        let token_usage = body
            .usage
            .map(|usage| TokenUsage::new(usage.input_tokens, usage.output_tokens));

        Ok(LlmResponse::new(content, token_usage))
    }

    async fn validate_key(&self, api_key: &str) -> Result<bool, LlmError> {
        let response = self.get_models(api_key).await?;
        Ok(response.status().is_success())
    }

    async fn list_models(&self, api_key: &str) -> Result<Vec<String>, LlmError> {
        let response = self.get_models(api_key).await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::provider(
                LlmProvider::Anthropic,
                error_message(&body),
            ));
        }

        let models: ModelList = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse model list: {}", e)))?;

        Ok(models.data.into_iter().map(|model| model.id).collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
