//! OpenAI Chat Completions API adapter.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{error_message, transport_error, ChatMessage, ProviderApi};
use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse, TokenUsage};
use crate::ports::LlmError;

/// Default OpenAI API origin.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Only chat-capable GPT models are offered for selection.
const CHAT_MODEL_PREFIX: &str = "gpt";

/// Calls OpenAI's Chat Completions and Models endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiApi {
    client: Client,
    base_url: String,
}

impl OpenAiApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url)
    }

    /// Converts a prompt to OpenAI's format: system, examples, then user.
    fn to_openai_request<'a>(&self, config: &'a LlmConfig, prompt: &'a LlmPrompt) -> OpenAiRequest<'a> {
        let mut messages = Vec::with_capacity(prompt.examples().len() * 2 + 2);
        messages.push(ChatMessage::system(prompt.system_prompt()));
        for example in prompt.examples() {
            messages.push(ChatMessage::user(&example.user_prompt));
            messages.push(ChatMessage::assistant(&example.assistant_response));
        }
        messages.push(ChatMessage::user(prompt.user_prompt()));

        OpenAiRequest {
            model: config.model(),
            messages,
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        }
    }

    async fn get_models(&self, api_key: &str) -> Result<Response, LlmError> {
        self.client
            .get(self.models_url())
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl ProviderApi for OpenAiApi {
    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAI
    }

    async fn send(&self, config: &LlmConfig, prompt: &LlmPrompt) -> Result<LlmResponse, LlmError> {
        let request = self.to_openai_request(config, prompt);

        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .bearer_auth(config.api_key().expose())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::provider(LlmProvider::OpenAI, error_message(&body)));
        }

        let body: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Parse("Response contained no choices".to_string()))?;

        let token_usage = body.usage.map(|usage| {
            TokenUsage::with_total(usage.prompt_tokens, usage.completion_tokens, usage.total_tokens)
        });

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
            return Err(LlmError::provider(LlmProvider::OpenAI, error_message(&body)));
        }

        let models: ModelList = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse model list: {}", e)))?;

        Ok(models
            .data
            .into_iter()
            .map(|model| model.id)
            .filter(|id| id.starts_with(CHAT_MODEL_PREFIX))
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
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
