//! Prompt construction for every modeling task.
//!
//! Each builder pairs a fixed instructional system prompt with a user prompt.
//! Structured arguments are serialized to JSON with keys in argument order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{UseCase, ValidationError};
use crate::domain::modeling::{DomainModelResult, UbiquitousLanguage};

/// A few-shot example shown to the model ahead of the real request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptExample {
    pub user_prompt: String,
    pub assistant_response: String,
}

impl PromptExample {
    pub fn new(user_prompt: impl Into<String>, assistant_response: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            assistant_response: assistant_response.into(),
        }
    }
}

/// Prompt structure for LLM requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmPrompt {
    system_prompt: String,
    user_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    examples: Option<Vec<PromptExample>>,
}

const UBIQUITOUS_LANGUAGE_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Extract ubiquitous language terms from the user's input. ",
    "For each term, provide a name and description. ",
    "Return the result as a JSON array of objects with 'name' and 'description' properties."
);

const USE_CASES_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Extract use cases from the user's input. ",
    "A use case is a specific scenario or action that a user can perform in the system. ",
    "Return the result as a JSON array of strings, each representing a use case."
);

const CLARIFYING_QUESTIONS_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Generate clarifying questions to refine understanding of the domain. ",
    "Consider the extracted ubiquitous language terms, use cases, and conversation history. ",
    "Focus on areas that are ambiguous, incomplete, or need more detail. ",
    "Return the result as a JSON array of strings, each representing a question."
);

const DOMAIN_MODEL_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Generate a complete domain model based on the provided ubiquitous language terms, use cases, and descriptions. ",
    "The domain model should include entities, value objects, aggregates, bounded contexts, events, commands, and relationships. ",
    "Follow Domain-Driven Design principles. ",
    "Return the result as a JSON object with the following structure: ",
    "{ entities: [], valueObjects: [], aggregates: [], boundedContexts: [], events: [], commands: [], relationships: [] }"
);

const REFINE_MODEL_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Refine the provided domain model based on the refinement instruction. ",
    "Maintain the integrity and consistency of the model while applying the requested changes. ",
    "Return the updated model as a JSON object with the same structure as the input model."
);

const REFINEMENT_SUGGESTIONS_INSTRUCTIONS: &str = concat!(
    "You are a domain modeling expert. Analyze the provided domain model and suggest potential improvements. ",
    "Consider aspects like completeness, consistency, and adherence to domain-driven design principles. ",
    "Look for missing entities, relationships, or bounded contexts. ",
    "Return the result as a JSON array of strings, each representing a suggestion."
);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClarifyingQuestionsPayload<'a> {
    terms: &'a [UbiquitousLanguage],
    use_cases: &'a [UseCase],
    user_input_history: &'a [String],
    previous_responses: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DomainModelPayload<'a> {
    terms: &'a [UbiquitousLanguage],
    use_cases: &'a [UseCase],
    descriptions: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefineModelPayload<'a> {
    current_model: &'a DomainModelResult,
    refinement_instruction: &'a str,
}

impl LlmPrompt {
    /// Creates a prompt, rejecting empty system or user text.
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        examples: Option<Vec<PromptExample>>,
    ) -> Result<Self, ValidationError> {
        let system_prompt = system_prompt.into();
        let user_prompt = user_prompt.into();

        if system_prompt.is_empty() {
            return Err(ValidationError::required("System prompt"));
        }
        if user_prompt.is_empty() {
            return Err(ValidationError::required("User prompt"));
        }

        Ok(Self {
            system_prompt,
            user_prompt,
            examples,
        })
    }

    /// Prompt for extracting ubiquitous language terms from a description.
    pub fn ubiquitous_language(user_input: &str) -> Result<Self, ValidationError> {
        Self::new(UBIQUITOUS_LANGUAGE_INSTRUCTIONS, user_input, None)
    }

    /// Prompt for extracting use cases from a description.
    pub fn use_cases(user_input: &str) -> Result<Self, ValidationError> {
        Self::new(USE_CASES_INSTRUCTIONS, user_input, None)
    }

    /// Prompt for clarifying questions given everything gathered so far.
    pub fn clarifying_questions(
        terms: &[UbiquitousLanguage],
        use_cases: &[UseCase],
        user_input_history: &[String],
        previous_responses: &[String],
    ) -> Result<Self, ValidationError> {
        let payload = ClarifyingQuestionsPayload {
            terms,
            use_cases,
            user_input_history,
            previous_responses,
        };
        Self::new(CLARIFYING_QUESTIONS_INSTRUCTIONS, to_json(&payload), None)
    }

    /// Prompt for generating a full domain model.
    pub fn domain_model(
        terms: &[UbiquitousLanguage],
        use_cases: &[UseCase],
        descriptions: &BTreeMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let payload = DomainModelPayload {
            terms,
            use_cases,
            descriptions,
        };
        Self::new(DOMAIN_MODEL_INSTRUCTIONS, to_json(&payload), None)
    }

    /// Prompt for applying a natural-language refinement to a model.
    pub fn refine_domain_model(
        current_model: &DomainModelResult,
        refinement_instruction: &str,
    ) -> Result<Self, ValidationError> {
        let payload = RefineModelPayload {
            current_model,
            refinement_instruction,
        };
        Self::new(REFINE_MODEL_INSTRUCTIONS, to_json(&payload), None)
    }

    /// Prompt for improvement suggestions on a model.
    pub fn refinement_suggestions(
        current_model: &DomainModelResult,
    ) -> Result<Self, ValidationError> {
        Self::new(REFINEMENT_SUGGESTIONS_INSTRUCTIONS, to_json(current_model), None)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn examples(&self) -> &[PromptExample] {
        self.examples.as_deref().unwrap_or_default()
    }
}

// Payloads are plain data with string keys; serialization cannot fail.
fn to_json<T: Serialize + ?Sized>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_default()
}
