//! HTTP handlers for LLM configuration endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::active_config::ActiveLlmConfig;
use crate::adapters::http::error::{ApiError, ApiResult};
use crate::domain::llm::{LlmConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::ports::LlmGateway;

use super::dto::{
    LlmConfigResponse, ModelsQuery, ModelsResponse, SaveLlmConfigRequest, ValidateKeyRequest,
    ValidateKeyResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LlmHandlers {
    gateway: Arc<dyn LlmGateway>,
    active: ActiveLlmConfig,
}

impl LlmHandlers {
    pub fn new(gateway: Arc<dyn LlmGateway>, active: ActiveLlmConfig) -> Self {
        Self { gateway, active }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/llm/config - Active configuration (saved, else server default)
pub async fn get_config(State(handlers): State<LlmHandlers>) -> ApiResult<Json<LlmConfigResponse>> {
    match handlers.active.current().await? {
        Some(config) => Ok(Json(LlmConfigResponse::from(&config))),
        None => Err(ApiError::NotFound("No LLM configuration".to_string())),
    }
}

/// PUT /api/llm/config - Validate and save the active configuration
pub async fn save_config(
    State(handlers): State<LlmHandlers>,
    payload: Result<Json<SaveLlmConfigRequest>, JsonRejection>,
) -> ApiResult<Json<LlmConfigResponse>> {
    let Json(req) = payload?;
    let config = LlmConfig::new(
        &req.provider,
        &req.api_key,
        &req.model,
        req.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        req.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    )?;

    handlers.active.repository().save(&config).await?;
    Ok(Json(LlmConfigResponse::from(&config)))
}

/// DELETE /api/llm/config - Forget the saved configuration
pub async fn delete_config(State(handlers): State<LlmHandlers>) -> ApiResult<Response> {
    handlers.active.repository().delete().await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/llm/validate - Check an API key with its provider
pub async fn validate_key(
    State(handlers): State<LlmHandlers>,
    payload: Result<Json<ValidateKeyRequest>, JsonRejection>,
) -> ApiResult<Json<ValidateKeyResponse>> {
    let Json(req) = payload?;
    let valid = handlers
        .gateway
        .validate_api_key(&req.provider, &req.api_key)
        .await;
    Ok(Json(ValidateKeyResponse { valid }))
}

/// GET /api/llm/models?provider= - Models the active key can reach
///
/// The active key is only sent to its own provider; asking for another
/// provider yields an empty list.
pub async fn list_models(
    State(handlers): State<LlmHandlers>,
    Query(query): Query<ModelsQuery>,
) -> ApiResult<Json<ModelsResponse>> {
    let active = handlers.active.current().await?;

    let provider = match (&query.provider, &active) {
        (Some(provider), _) => provider.clone(),
        (None, Some(config)) => config.provider().to_string(),
        (None, None) => return Err(ApiError::BadRequest("provider is required".to_string())),
    };

    let api_key = active
        .as_ref()
        .filter(|config| config.provider().as_str() == provider)
        .map(|config| config.api_key().expose().to_string())
        .unwrap_or_default();

    let models = handlers
        .gateway
        .get_available_models(&provider, &api_key)
        .await;
    Ok(Json(ModelsResponse { provider, models }))
}
