//! HTTP DTOs for modeling endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::UseCase;
use crate::domain::modeling::{DomainModelResult, UbiquitousLanguage};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Free-form business description to mine for terms and use cases.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub input: String,
}

/// Request for clarifying questions. Omitted terms or use cases are read
/// from the workspace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionsRequest {
    pub terms: Option<Vec<UbiquitousLanguage>>,
    pub use_cases: Option<Vec<UseCase>>,
    pub user_input_history: Vec<String>,
    pub previous_responses: Vec<String>,
}

/// Request to generate a model. Omitted terms or use cases are read from
/// the workspace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub terms: Option<Vec<UbiquitousLanguage>>,
    pub use_cases: Option<Vec<UseCase>>,
    /// Additional descriptions keyed by topic.
    pub descriptions: BTreeMap<String, String>,
}

/// Request to refine a model; the stored model is used when none is sent.
#[derive(Debug, Clone, Deserialize)]
pub struct RefineRequest {
    #[serde(default)]
    pub model: Option<DomainModelResult>,
    pub instruction: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub model: Option<DomainModelResult>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub terms: Vec<UbiquitousLanguage>,
    pub use_cases: Vec<UseCase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// A stored use case with its description.
#[derive(Debug, Clone, Serialize)]
pub struct UseCaseEntry {
    pub name: UseCase,
    pub description: String,
}
