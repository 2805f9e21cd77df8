//! Modeling services - prompt, call, parse.
//!
//! Every service degrades to an empty (or unchanged) result when the prompt
//! is invalid, the provider call fails, or the reply is not the expected
//! JSON. Failures are logged, never returned.

mod extraction;
mod generation;
mod json_reply;
mod refinement;

pub use extraction::ModelExtractionService;
pub use generation::ModelGenerationService;
pub use json_reply::{extract_json, parse_reply, ReplyError};
pub use refinement::ModelRefinementService;

use serde::de::DeserializeOwned;

use crate::domain::foundation::ValidationError;
use crate::domain::llm::{LlmConfig, LlmPrompt};
use crate::ports::{LlmError, LlmGateway};

/// Why a service fell back to its default.
#[derive(Debug, thiserror::Error)]
enum ServiceError {
    #[error(transparent)]
    Prompt(#[from] ValidationError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

/// Sends `prompt` and parses the reply as `T`.
async fn ask<T: DeserializeOwned>(
    gateway: &dyn LlmGateway,
    config: &LlmConfig,
    prompt: Result<LlmPrompt, ValidationError>,
) -> Result<T, ServiceError> {
    let prompt = prompt?;
    let response = gateway.send_prompt(config, &prompt).await?;
    Ok(parse_reply(&response.content)?)
}
