//! LLM adapters - per-provider HTTP integrations behind the LlmGateway port.
//!
//! - `LlmClient` - Dispatches to the adapter for the configured provider
//! - `AnthropicApi` / `OpenAiApi` - Vendor HTTP integrations
//! - `UnimplementedApi` - Known vendors without an integration yet
//! - `MockLlmGateway` - Scripted gateway for tests

mod anthropic;
mod client;
mod mock;
mod openai;
mod unimplemented;

pub use anthropic::{AnthropicApi, DEFAULT_ANTHROPIC_BASE_URL};
pub use client::{LlmClient, LlmClientConfig};
pub use mock::MockLlmGateway;
pub use openai::{OpenAiApi, DEFAULT_OPENAI_BASE_URL};
pub use unimplemented::UnimplementedApi;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::llm::{LlmConfig, LlmPrompt, LlmProvider, LlmResponse};
use crate::ports::LlmError;

/// One vendor's API surface.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    fn provider(&self) -> LlmProvider;

    async fn send(&self, config: &LlmConfig, prompt: &LlmPrompt) -> Result<LlmResponse, LlmError>;

    /// Whether the model-listing endpoint accepts the key.
    async fn validate_key(&self, api_key: &str) -> Result<bool, LlmError>;

    async fn list_models(&self, api_key: &str) -> Result<Vec<String>, LlmError>;
}

/// Chat turn in the shape both vendors accept.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }

    fn assistant(content: &'a str) -> Self {
        Self {
            role: "assistant",
            content,
        }
    }
}

const UNKNOWN_ERROR: &str = "Unknown error";

/// Extracts `error.message` from a vendor error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

fn transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Network(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        LlmError::Network(format!("Connection failed: {}", e))
    } else {
        LlmError::Network(e.to_string())
    }
}
