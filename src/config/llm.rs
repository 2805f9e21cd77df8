//! LLM provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::llm::{LlmClientConfig, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_OPENAI_BASE_URL};
use crate::domain::llm::{LlmConfig, LlmProvider, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// LLM provider configuration
///
/// Supplies the server-side API key and the defaults used until a
/// configuration is saved through the API.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Provider API key
    pub api_key: Option<Secret<String>>,

    /// Provider wire name (anthropic, openai, google, mistral)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Provider request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
}

impl LlmSettings {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Exposes the API key, or "" when none is configured.
    pub fn api_key(&self) -> &str {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or_default()
    }

    /// Call configuration built from these settings, if a key is present.
    pub fn default_llm_config(&self) -> Option<LlmConfig> {
        if !self.has_api_key() {
            return None;
        }
        LlmConfig::new(
            &self.provider,
            self.api_key(),
            &self.model,
            self.temperature,
            self.max_tokens,
        )
        .ok()
    }

    /// HTTP client settings for the provider adapters
    pub fn client_config(&self) -> LlmClientConfig {
        LlmClientConfig::default()
            .with_anthropic_base_url(&self.anthropic_base_url)
            .with_openai_base_url(&self.openai_base_url)
            .with_timeout(self.timeout())
    }

    /// Validate LLM configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider.parse::<LlmProvider>().is_err() {
            return Err(ValidationError::UnsupportedProvider(self.provider.clone()));
        }
        if self.model.is_empty() {
            return Err(ValidationError::MissingRequired("LLM model"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidLlmTimeout);
        }
        if !is_http_url(&self.anthropic_base_url) {
            return Err(ValidationError::InvalidBaseUrl("anthropic"));
        }
        if !is_http_url(&self.openai_base_url) {
            return Err(ValidationError::InvalidBaseUrl("openai"));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            anthropic_base_url: default_anthropic_base_url(),
            openai_base_url: default_openai_base_url(),
        }
    }
}

fn default_provider() -> String {
    LlmProvider::Anthropic.as_str().to_string()
}

fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout() -> u64 {
    120
}

fn default_anthropic_base_url() -> String {
    DEFAULT_ANTHROPIC_BASE_URL.to_string()
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}
