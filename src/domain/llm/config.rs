//! LLM call configuration.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::LlmProvider;
use crate::domain::foundation::ValidationError;

/// Temperature used when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token ceiling used when the caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Provider API key. Redacted from `Debug`, written out in full when the
/// configuration is persisted.
#[derive(Clone)]
pub struct ApiKey(Secret<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Secret::new(key.into()))
    }

    /// Exposes the key (for making requests).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl PartialEq for ApiKey {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

/// Configuration for a single LLM call.
///
/// Built through [`LlmConfig::new`], which enforces that every field is
/// present and the numeric parameters are in range. Deserialization goes
/// through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLlmConfig")]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: ApiKey,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

/// Wire shape of [`LlmConfig`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLlmConfig {
    provider: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl TryFrom<RawLlmConfig> for LlmConfig {
    type Error = ValidationError;

    fn try_from(raw: RawLlmConfig) -> Result<Self, Self::Error> {
        LlmConfig::new(
            &raw.provider,
            &raw.api_key,
            &raw.model,
            raw.temperature,
            raw.max_tokens,
        )
    }
}

impl LlmConfig {
    /// Creates a validated configuration.
    ///
    /// Checks run in field order, so the first offending field names the
    /// error.
    pub fn new(
        provider: &str,
        api_key: &str,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, ValidationError> {
        if provider.is_empty() {
            return Err(ValidationError::required("Provider"));
        }
        let provider: LlmProvider = provider.parse()?;

        if api_key.is_empty() {
            return Err(ValidationError::required("API key"));
        }
        if model.is_empty() {
            return Err(ValidationError::required("Model"));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ValidationError::out_of_range("Temperature", 0.0, 1.0));
        }
        if max_tokens < 1 {
            return Err(ValidationError::too_small("Max tokens", 0));
        }

        Ok(Self {
            provider,
            api_key: ApiKey::new(api_key),
            model: model.to_string(),
            temperature,
            max_tokens,
        })
    }

    /// Creates a configuration with the default temperature and token limit.
    pub fn with_defaults(
        provider: &str,
        api_key: &str,
        model: &str,
    ) -> Result<Self, ValidationError> {
        Self::new(provider, api_key, model, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn creates_config_with_defaults() {
        let config =
            LlmConfig::with_defaults("anthropic", "test-api-key", "claude-3-sonnet-20240229")
                .unwrap();

        assert_eq!(config.provider(), LlmProvider::Anthropic);
        assert_eq!(config.api_key().expose(), "test-api-key");
        assert_eq!(config.model(), "claude-3-sonnet-20240229");
        assert_eq!(config.temperature(), 0.7);
        assert_eq!(config.max_tokens(), 2000);
    }

    #[test]
    fn creates_config_with_custom_parameters() {
        let config = LlmConfig::new("openai", "test-api-key", "gpt-4", 0.5, 1000).unwrap();
        assert_eq!(config.provider(), LlmProvider::OpenAI);
        assert_eq!(config.temperature(), 0.5);
        assert_eq!(config.max_tokens(), 1000);
    }

    #[test]
    fn rejects_missing_provider() {
        let err = LlmConfig::with_defaults("", "test-api-key", "gpt-4").unwrap_err();
        assert_eq!(err.to_string(), "Provider is required");
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = LlmConfig::with_defaults("cohere", "test-api-key", "gpt-4").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported provider: cohere");
    }

    #[test]
    fn rejects_missing_api_key() {
        let err = LlmConfig::with_defaults("openai", "", "gpt-4").unwrap_err();
        assert_eq!(err.to_string(), "API key is required");
    }

    #[test]
    fn rejects_missing_model() {
        let err = LlmConfig::with_defaults("openai", "test-api-key", "").unwrap_err();
        assert_eq!(err.to_string(), "Model is required");
    }

    #[test]
    fn rejects_temperature_out_of_range() {
        for temperature in [1.5, -0.1, f32::NAN] {
            let err = LlmConfig::new("openai", "key", "gpt-4", temperature, 100).unwrap_err();
            assert_eq!(err.to_string(), "Temperature must be between 0 and 1");
        }
    }

    #[test]
    fn rejects_zero_max_tokens() {
        let err = LlmConfig::new("openai", "key", "gpt-4", 0.7, 0).unwrap_err();
        assert_eq!(err.to_string(), "Max tokens must be greater than 0");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = LlmConfig::with_defaults("openai", "sk-secret", "gpt-4").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn serializes_with_camel_case_fields_and_plain_key() {
        let config = LlmConfig::new("anthropic", "k", "claude", 0.25, 10).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "provider": "anthropic",
                "apiKey": "k",
                "model": "claude",
                "temperature": 0.25,
                "maxTokens": 10
            })
        );

        let back: LlmConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn deserializing_rejects_out_of_range_temperature() {
        let result: Result<LlmConfig, _> = serde_json::from_value(serde_json::json!({
            "provider": "openai",
            "apiKey": "k",
            "model": "gpt-4",
            "temperature": 3.0,
            "maxTokens": 10
        }));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Temperature must be between 0 and 1"));
    }

    #[test]
    fn deserializing_rejects_empty_api_key() {
        let result: Result<LlmConfig, _> = serde_json::from_value(serde_json::json!({
            "provider": "anthropic",
            "apiKey": "",
            "model": "claude",
            "temperature": 0.5,
            "maxTokens": 10
        }));

        assert!(result.unwrap_err().to_string().contains("API key is required"));
    }

    proptest! {
        #[test]
        fn valid_inputs_are_preserved(
            provider_idx in 0usize..4,
            api_key in "[a-zA-Z0-9-]{1,32}",
            model in "[a-z0-9.-]{1,24}",
            temperature in 0.0f32..=1.0,
            max_tokens in 1u32..=200_000,
        ) {
            let provider = LlmProvider::ALL[provider_idx];
            let config = LlmConfig::new(
                provider.as_str(), &api_key, &model, temperature, max_tokens,
            ).unwrap();

            prop_assert_eq!(config.provider(), provider);
            prop_assert_eq!(config.api_key().expose(), api_key.as_str());
            prop_assert_eq!(config.model(), model.as_str());
            prop_assert_eq!(config.temperature(), temperature);
            prop_assert_eq!(config.max_tokens(), max_tokens);
        }

        #[test]
        fn temperatures_above_one_are_rejected(temperature in 1.0001f32..100.0) {
            let result = LlmConfig::new("anthropic", "key", "model", temperature, 10);
            prop_assert!(
                matches!(result, Err(ValidationError::OutOfRange { field: "Temperature", .. })),
                "expected temperature range error"
            );
        }
    }
}
