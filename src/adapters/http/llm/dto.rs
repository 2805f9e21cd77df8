//! HTTP DTOs for LLM configuration endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::llm::{LlmConfig, LlmProvider};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to save the active configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLlmConfigRequest {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Request to check an API key against its provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    pub provider: String,
    pub api_key: String,
}

/// Query for the model listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsQuery {
    pub provider: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Active configuration, without the key itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfigResponse {
    pub provider: LlmProvider,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub has_api_key: bool,
}

impl From<&LlmConfig> for LlmConfigResponse {
    fn from(config: &LlmConfig) -> Self {
        Self {
            provider: config.provider(),
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            has_api_key: !config.api_key().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub provider: String,
    pub models: Vec<String>,
}
