//! Mock LLM gateway for testing.
//!
//! Returns scripted replies in order and records every prompt it receives,
//! so services can be tested without calling real providers.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockLlmGateway::new()
//!     .with_response(r#"{"terms": []}"#)
//!     .with_error(LlmError::Network("down".into()));
//!
//! let response = gateway.send_prompt(&config, &prompt).await?;
//! assert_eq!(gateway.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::llm::{LlmConfig, LlmPrompt, LlmResponse, TokenUsage};
use crate::ports::{LlmError, LlmGateway};

/// Scripted implementation of the LlmGateway port.
#[derive(Debug, Clone, Default)]
pub struct MockLlmGateway {
    /// Pre-configured replies (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<LlmResponse, LlmError>>>>,
    /// Prompts received, for verification.
    calls: Arc<Mutex<Vec<LlmPrompt>>>,
    valid_keys: Vec<String>,
    models: Vec<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlmGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(LlmResponse::new(
            content,
            Some(TokenUsage::new(10, 20)),
        )));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: LlmError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Accepts `key` in `validate_api_key`.
    pub fn with_valid_key(mut self, key: impl Into<String>) -> Self {
        self.valid_keys.push(key.into());
        self
    }

    /// Models returned for any accepted key.
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded prompts.
    pub fn calls(&self) -> Vec<LlmPrompt> {
        lock(&self.calls).clone()
    }

    /// Most recent prompt, if any.
    pub fn last_call(&self) -> Option<LlmPrompt> {
        lock(&self.calls).last().cloned()
    }
}

#[async_trait]
impl LlmGateway for MockLlmGateway {
    async fn send_prompt(
        &self,
        _config: &LlmConfig,
        prompt: &LlmPrompt,
    ) -> Result<LlmResponse, LlmError> {
        lock(&self.calls).push(prompt.clone());

        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(LlmResponse::new("Mock response", None)))
    }

    async fn validate_api_key(&self, _provider: &str, api_key: &str) -> bool {
        self.valid_keys.iter().any(|k| k == api_key)
    }

    async fn get_available_models(&self, provider: &str, api_key: &str) -> Vec<String> {
        if self.validate_api_key(provider, api_key).await {
            self.models.clone()
        } else {
            Vec::new()
        }
    }
}
