//! HTTP handlers for modeling endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::active_config::ActiveLlmConfig;
use crate::adapters::http::error::{ApiError, ApiResult};
use crate::adapters::repositories::ModelingWorkspace;
use crate::application::services::{
    ModelExtractionService, ModelGenerationService, ModelRefinementService,
};
use crate::domain::foundation::UseCase;
use crate::domain::modeling::{
    Aggregate, Command, DomainModelResult, Entity, Event, UbiquitousLanguage, ValueObject,
};

use super::dto::{
    ExtractRequest, ExtractResponse, GenerateRequest, QuestionsRequest, QuestionsResponse,
    RefineRequest, SuggestionsRequest, SuggestionsResponse, UseCaseEntry,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ModelingHandlers {
    extraction: Arc<ModelExtractionService>,
    generation: Arc<ModelGenerationService>,
    refinement: Arc<ModelRefinementService>,
    workspace: ModelingWorkspace,
    active: ActiveLlmConfig,
}

impl ModelingHandlers {
    pub fn new(
        extraction: Arc<ModelExtractionService>,
        generation: Arc<ModelGenerationService>,
        refinement: Arc<ModelRefinementService>,
        workspace: ModelingWorkspace,
        active: ActiveLlmConfig,
    ) -> Self {
        Self {
            extraction,
            generation,
            refinement,
            workspace,
            active,
        }
    }

    async fn terms_or_stored(
        &self,
        terms: Option<Vec<UbiquitousLanguage>>,
    ) -> ApiResult<Vec<UbiquitousLanguage>> {
        match terms {
            Some(terms) => Ok(terms),
            None => Ok(self.workspace.stored_terms().await?),
        }
    }

    async fn use_cases_or_stored(&self, use_cases: Option<Vec<UseCase>>) -> ApiResult<Vec<UseCase>> {
        match use_cases {
            Some(use_cases) => Ok(use_cases),
            None => Ok(self.workspace.use_cases().list().await?),
        }
    }

    async fn model_or_stored(&self, model: Option<DomainModelResult>) -> ApiResult<DomainModelResult> {
        match model {
            Some(model) => Ok(model),
            None => Ok(self.workspace.current_model().await?),
        }
    }
}

fn require_text(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Assistant handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/modeling/extract - Extract terms and use cases from a description
pub async fn extract(
    State(handlers): State<ModelingHandlers>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> ApiResult<Json<ExtractResponse>> {
    let Json(req) = payload?;
    require_text("input", &req.input)?;
    let config = handlers.active.require().await?;

    let (terms, use_cases) = tokio::join!(
        handlers.extraction.extract_ubiquitous_language(&config, &req.input),
        handlers.extraction.extract_use_cases(&config, &req.input),
    );

    handlers.workspace.record_terms(&terms).await?;
    handlers.workspace.record_use_cases(&use_cases).await?;

    tracing::info!(
        terms = terms.len(),
        use_cases = use_cases.len(),
        "Extracted modeling vocabulary"
    );
    Ok(Json(ExtractResponse { terms, use_cases }))
}

/// POST /api/modeling/questions - Clarifying questions for the current vocabulary
pub async fn questions(
    State(handlers): State<ModelingHandlers>,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> ApiResult<Json<QuestionsResponse>> {
    let Json(req) = payload?;
    let config = handlers.active.require().await?;
    let terms = handlers.terms_or_stored(req.terms).await?;
    let use_cases = handlers.use_cases_or_stored(req.use_cases).await?;

    let questions = handlers
        .extraction
        .generate_clarifying_questions(
            &config,
            &terms,
            &use_cases,
            &req.user_input_history,
            &req.previous_responses,
        )
        .await;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/modeling/generate - Generate and store a complete domain model
///
/// An empty result leaves the stored model untouched.
pub async fn generate(
    State(handlers): State<ModelingHandlers>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<DomainModelResult>> {
    let Json(req) = payload?;
    let config = handlers.active.require().await?;
    let terms = handlers.terms_or_stored(req.terms).await?;
    let use_cases = handlers.use_cases_or_stored(req.use_cases).await?;

    let model = handlers
        .generation
        .generate_domain_model(&config, &terms, &use_cases, &req.descriptions)
        .await;

    if !model.is_empty() {
        handlers.workspace.replace_model(&model).await?;
    }
    Ok(Json(model))
}

/// POST /api/modeling/refine - Apply an instruction to the model and store the result
pub async fn refine(
    State(handlers): State<ModelingHandlers>,
    payload: Result<Json<RefineRequest>, JsonRejection>,
) -> ApiResult<Json<DomainModelResult>> {
    let Json(req) = payload?;
    require_text("instruction", &req.instruction)?;
    let config = handlers.active.require().await?;
    let current = handlers.model_or_stored(req.model).await?;

    let refined = handlers
        .refinement
        .refine_domain_model(&config, &current, &req.instruction)
        .await;

    if refined != current {
        handlers.workspace.replace_model(&refined).await?;
    }
    Ok(Json(refined))
}

/// POST /api/modeling/suggestions - Improvement suggestions for the model
pub async fn suggestions(
    State(handlers): State<ModelingHandlers>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> ApiResult<Json<SuggestionsResponse>> {
    let Json(req) = payload?;
    let config = handlers.active.require().await?;
    let current = handlers.model_or_stored(req.model).await?;

    let suggestions = handlers
        .refinement
        .generate_refinement_suggestions(&config, &current)
        .await;
    Ok(Json(SuggestionsResponse { suggestions }))
}

// ════════════════════════════════════════════════════════════════════════════
// Workspace handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/modeling/entities
pub async fn list_entities(State(handlers): State<ModelingHandlers>) -> ApiResult<Json<Vec<Entity>>> {
    Ok(Json(handlers.workspace.entities().list().await?))
}

/// GET /api/modeling/value-objects
pub async fn list_value_objects(
    State(handlers): State<ModelingHandlers>,
) -> ApiResult<Json<Vec<ValueObject>>> {
    Ok(Json(handlers.workspace.value_objects().list().await?))
}

/// GET /api/modeling/aggregates
pub async fn list_aggregates(
    State(handlers): State<ModelingHandlers>,
) -> ApiResult<Json<Vec<Aggregate>>> {
    Ok(Json(handlers.workspace.aggregates().list().await?))
}

/// GET /api/modeling/events
pub async fn list_events(State(handlers): State<ModelingHandlers>) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(handlers.workspace.events().list().await?))
}

/// GET /api/modeling/commands
pub async fn list_commands(State(handlers): State<ModelingHandlers>) -> ApiResult<Json<Vec<Command>>> {
    Ok(Json(handlers.workspace.commands().list().await?))
}

/// GET /api/modeling/terms
pub async fn list_terms(
    State(handlers): State<ModelingHandlers>,
) -> ApiResult<Json<Vec<UbiquitousLanguage>>> {
    Ok(Json(handlers.workspace.stored_terms().await?))
}

/// GET /api/modeling/use-cases
pub async fn list_use_cases(
    State(handlers): State<ModelingHandlers>,
) -> ApiResult<Json<Vec<UseCaseEntry>>> {
    let entries = handlers
        .workspace
        .use_cases()
        .entries()
        .await?
        .into_iter()
        .map(|(name, description)| UseCaseEntry { name, description })
        .collect();
    Ok(Json(entries))
}

/// DELETE /api/modeling - Clear every modeling store
pub async fn clear_workspace(State(handlers): State<ModelingHandlers>) -> ApiResult<Response> {
    handlers.workspace.clear().await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// GET /api/modeling/export/markdown
pub async fn export_markdown(State(handlers): State<ModelingHandlers>) -> ApiResult<Response> {
    let markdown = handlers.workspace.export_markdown().await?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], markdown).into_response())
}

/// GET /api/modeling/export/diagram - Mermaid class diagram
pub async fn export_diagram(State(handlers): State<ModelingHandlers>) -> ApiResult<Response> {
    let diagram = handlers.workspace.export_diagram().await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], diagram).into_response())
}
