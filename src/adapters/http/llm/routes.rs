//! HTTP routes for LLM configuration endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{delete_config, get_config, list_models, save_config, validate_key, LlmHandlers};

/// Creates the LLM router with all endpoints.
pub fn llm_routes(handlers: LlmHandlers) -> Router {
    Router::new()
        .route("/models", get(list_models))
        .route("/validate", post(validate_key))
        .route(
            "/config",
            get(get_config).put(save_config).delete(delete_config),
        )
        .with_state(handlers)
}
