//! LLM provider identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A large-language-model vendor the client knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    Google,
    Mistral,
}

impl LlmProvider {
    /// All known providers, in display order.
    pub const ALL: [LlmProvider; 4] = [
        LlmProvider::Anthropic,
        LlmProvider::OpenAI,
        LlmProvider::Google,
        LlmProvider::Mistral,
    ];

    /// Wire identifier (e.g. "openai").
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Google => "google",
            LlmProvider::Mistral => "mistral",
        }
    }

    /// Human-facing vendor name used in error messages (e.g. "OpenAI").
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "Anthropic",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Google => "Google",
            LlmProvider::Mistral => "Mistral",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a provider string names no known vendor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported provider: {0}")]
pub struct UnsupportedProviderError(pub String);

impl FromStr for LlmProvider {
    type Err = UnsupportedProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LlmProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnsupportedProviderError(s.to_string()))
    }
}
