//! HTTP routes for modeling endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    clear_workspace, export_diagram, export_markdown, extract, generate, list_aggregates,
    list_commands, list_entities, list_events, list_terms, list_use_cases, list_value_objects,
    questions, refine, suggestions, ModelingHandlers,
};

/// Creates the modeling router with all endpoints.
pub fn modeling_routes(handlers: ModelingHandlers) -> Router {
    Router::new()
        .route("/", delete(clear_workspace))
        .route("/extract", post(extract))
        .route("/questions", post(questions))
        .route("/generate", post(generate))
        .route("/refine", post(refine))
        .route("/suggestions", post(suggestions))
        .route("/entities", get(list_entities))
        .route("/value-objects", get(list_value_objects))
        .route("/aggregates", get(list_aggregates))
        .route("/events", get(list_events))
        .route("/commands", get(list_commands))
        .route("/terms", get(list_terms))
        .route("/use-cases", get(list_use_cases))
        .route("/export/markdown", get(export_markdown))
        .route("/export/diagram", get(export_diagram))
        .with_state(handlers)
}
