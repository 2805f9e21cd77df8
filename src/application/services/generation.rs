//! ModelGenerationService - full domain model from terms and use cases.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::ask;
use crate::domain::foundation::UseCase;
use crate::domain::llm::{LlmConfig, LlmPrompt};
use crate::domain::modeling::{DomainModelResult, UbiquitousLanguage};
use crate::ports::LlmGateway;

pub struct ModelGenerationService {
    gateway: Arc<dyn LlmGateway>,
}

impl ModelGenerationService {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Generates a complete model; an empty model on any failure.
    pub async fn generate_domain_model(
        &self,
        config: &LlmConfig,
        terms: &[UbiquitousLanguage],
        use_cases: &[UseCase],
        descriptions: &BTreeMap<String, String>,
    ) -> DomainModelResult {
        let prompt = LlmPrompt::domain_model(terms, use_cases, descriptions);
        match ask(self.gateway.as_ref(), config, prompt).await {
            Ok(model) => model,
            Err(e) => {
                tracing::error!(error = %e, "Error generating domain model");
                DomainModelResult::default()
            }
        }
    }
}
