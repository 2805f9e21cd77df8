//! ModelRefinementService - instruction-driven edits and suggestions.

use std::sync::Arc;

use super::ask;
use crate::domain::llm::{LlmConfig, LlmPrompt};
use crate::domain::modeling::DomainModelResult;
use crate::ports::LlmGateway;

pub struct ModelRefinementService {
    gateway: Arc<dyn LlmGateway>,
}

impl ModelRefinementService {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Applies `instruction` to `current`. Returns `current` unchanged on
    /// any failure.
    pub async fn refine_domain_model(
        &self,
        config: &LlmConfig,
        current: &DomainModelResult,
        instruction: &str,
    ) -> DomainModelResult {
        let prompt = LlmPrompt::refine_domain_model(current, instruction);
        match ask(self.gateway.as_ref(), config, prompt).await {
            Ok(refined) => refined,
            Err(e) => {
                tracing::error!(error = %e, "Error refining domain model");
                current.clone()
            }
        }
    }

    /// Improvement suggestions for `current`; empty on any failure.
    pub async fn generate_refinement_suggestions(
        &self,
        config: &LlmConfig,
        current: &DomainModelResult,
    ) -> Vec<String> {
        let prompt = LlmPrompt::refinement_suggestions(current);
        match ask(self.gateway.as_ref(), config, prompt).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::error!(error = %e, "Error generating refinement suggestions");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmGateway;
    use crate::domain::modeling::Entity;
    use crate::ports::LlmError;
    use std::collections::BTreeMap;

    fn config() -> LlmConfig {
        LlmConfig::with_defaults("anthropic", "k", "claude").unwrap()
    }

    fn current() -> DomainModelResult {
        DomainModelResult {
            entities: vec![Entity::new("Order", BTreeMap::new())],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn failure_returns_current_model_unchanged() {
        let gateway = MockLlmGateway::new().with_error(LlmError::Network("down".to_string()));
        let service = ModelRefinementService::new(Arc::new(gateway));
        let current = current();

        let refined = service
            .refine_domain_model(&config(), &current, "Rename Order to Purchase")
            .await;

        assert_eq!(refined, current);
    }

    #[tokio::test]
    async fn unparseable_reply_returns_current_model() {
        let gateway = MockLlmGateway::new().with_response("Sure, I renamed it.");
        let service = ModelRefinementService::new(Arc::new(gateway.clone()));
        let current = current();

        assert_eq!(
            service.refine_domain_model(&config(), &current, "Rename Order").await,
            current
        );
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn successful_refinement_replaces_model() {
        let gateway = MockLlmGateway::new()
            .with_response(r#"{"entities": [{"name": "Purchase"}], "commands": []}"#);
        let service = ModelRefinementService::new(Arc::new(gateway.clone()));

        let refined = service
            .refine_domain_model(&config(), &current(), "Rename Order to Purchase")
            .await;

        assert_eq!(refined.entities[0].name.as_str(), "Purchase");
        let payload: serde_json::Value =
            serde_json::from_str(gateway.last_call().unwrap().user_prompt()).unwrap();
        assert_eq!(payload["refinementInstruction"], "Rename Order to Purchase");
        assert_eq!(payload["currentModel"]["entities"][0]["name"], "Order");
    }

    #[tokio::test]
    async fn suggestions_parsed_or_empty() {
        let gateway = MockLlmGateway::new()
            .with_response(r#"["Split Order into Order and Shipment"]"#)
            .with_response("not json");
        let service = ModelRefinementService::new(Arc::new(gateway));

        assert_eq!(
            service.generate_refinement_suggestions(&config(), &current()).await,
            vec!["Split Order into Order and Shipment"]
        );
        assert!(service
            .generate_refinement_suggestions(&config(), &current())
            .await
            .is_empty());
    }
}
