//! LLM module - provider selection, call configuration, prompts and responses.

mod config;
mod prompt;
mod provider;
mod response;

pub use config::{ApiKey, LlmConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use prompt::{LlmPrompt, PromptExample};
pub use provider::{LlmProvider, UnsupportedProviderError};
pub use response::{LlmResponse, TokenUsage};
