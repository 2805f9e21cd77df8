//! Provider-neutral LLM response.

use serde::{Deserialize, Serialize};

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

impl TokenUsage {
    /// Creates usage with the total derived from its parts, capped at `u32::MAX`.
    pub fn new(prompt: u32, completion: u32) -> Self {
        Self {
            prompt,
            completion,
            total: prompt.saturating_add(completion),
        }
    }

    /// Creates usage with a provider-reported total.
    pub fn with_total(prompt: u32, completion: u32, total: u32) -> Self {
        Self {
            prompt,
            completion,
            total,
        }
    }
}

/// Normalized reply from any provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl LlmResponse {
    pub fn new(content: impl Into<String>, token_usage: Option<TokenUsage>) -> Self {
        Self {
            content: content.into(),
            token_usage,
        }
    }
}
