//! ModelExtractionService - terms, use cases and clarifying questions.

use std::sync::Arc;

use super::ask;
use crate::domain::foundation::UseCase;
use crate::domain::llm::{LlmConfig, LlmPrompt};
use crate::domain::modeling::UbiquitousLanguage;
use crate::ports::LlmGateway;

/// Extracts modeling vocabulary from free-form descriptions.
pub struct ModelExtractionService {
    gateway: Arc<dyn LlmGateway>,
}

impl ModelExtractionService {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Ubiquitous language terms found in `input`; empty on any failure.
    pub async fn extract_ubiquitous_language(
        &self,
        config: &LlmConfig,
        input: &str,
    ) -> Vec<UbiquitousLanguage> {
        match ask(self.gateway.as_ref(), config, LlmPrompt::ubiquitous_language(input)).await {
            Ok(terms) => terms,
            Err(e) => {
                tracing::error!(error = %e, "Error extracting ubiquitous language");
                Vec::new()
            }
        }
    }

    /// Use cases found in `input`; empty on any failure.
    pub async fn extract_use_cases(&self, config: &LlmConfig, input: &str) -> Vec<UseCase> {
        match ask(self.gateway.as_ref(), config, LlmPrompt::use_cases(input)).await {
            Ok(use_cases) => use_cases,
            Err(e) => {
                tracing::error!(error = %e, "Error extracting use cases");
                Vec::new()
            }
        }
    }

    /// Questions that would sharpen the model; empty on any failure.
    pub async fn generate_clarifying_questions(
        &self,
        config: &LlmConfig,
        terms: &[UbiquitousLanguage],
        use_cases: &[UseCase],
        user_input_history: &[String],
        previous_responses: &[String],
    ) -> Vec<String> {
        let prompt = LlmPrompt::clarifying_questions(
            terms,
            use_cases,
            user_input_history,
            previous_responses,
        );
        match ask(self.gateway.as_ref(), config, prompt).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!(error = %e, "Error generating clarifying questions");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmGateway;
    use crate::ports::LlmError;

    fn config() -> LlmConfig {
        LlmConfig::with_defaults("anthropic", "k", "claude").unwrap()
    }

    fn service(gateway: &MockLlmGateway) -> ModelExtractionService {
        ModelExtractionService::new(Arc::new(gateway.clone()))
    }

    #[tokio::test]
    async fn extracts_terms_from_fenced_reply() {
        let gateway = MockLlmGateway::new().with_response(
            "```json\n[{\"name\": \"Order\", \"description\": \"A purchase request\"}]\n```",
        );

        let terms = service(&gateway)
            .extract_ubiquitous_language(&config(), "Customers place orders")
            .await;

        assert_eq!(terms, vec![UbiquitousLanguage::new("Order", "A purchase request")]);
        assert_eq!(
            gateway.last_call().unwrap().user_prompt(),
            "Customers place orders"
        );
    }

    #[tokio::test]
    async fn extracts_use_cases() {
        let gateway = MockLlmGateway::new().with_response(r#"["Place order", "Cancel order"]"#);

        let use_cases = service(&gateway).extract_use_cases(&config(), "shop").await;

        assert_eq!(
            use_cases,
            vec![UseCase::new("Place order"), UseCase::new("Cancel order")]
        );
    }

    #[tokio::test]
    async fn provider_failure_yields_empty() {
        let gateway = MockLlmGateway::new().with_error(LlmError::Network("down".to_string()));

        let terms = service(&gateway)
            .extract_ubiquitous_language(&config(), "shop")
            .await;
        assert!(terms.is_empty());
    }

    #[tokio::test]
    async fn prose_reply_yields_empty() {
        let gateway = MockLlmGateway::new().with_response("I am not sure what you mean.");

        assert!(service(&gateway)
            .extract_use_cases(&config(), "shop")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn empty_input_never_reaches_provider() {
        let gateway = MockLlmGateway::new();

        assert!(service(&gateway)
            .extract_ubiquitous_language(&config(), "")
            .await
            .is_empty());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn questions_prompt_carries_context() {
        let gateway = MockLlmGateway::new().with_response(r#"["Who approves refunds?"]"#);

        let questions = service(&gateway)
            .generate_clarifying_questions(
                &config(),
                &[UbiquitousLanguage::new("Refund", "Money back")],
                &[UseCase::new("Request refund")],
                &["We sell shoes".to_string()],
                &[],
            )
            .await;

        assert_eq!(questions, vec!["Who approves refunds?"]);
        let payload: serde_json::Value =
            serde_json::from_str(gateway.last_call().unwrap().user_prompt()).unwrap();
        assert_eq!(payload["useCases"][0], "Request refund");
        assert_eq!(payload["userInputHistory"][0], "We sell shoes");
    }
}
