//! HTTP adapter for modeling endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ExtractRequest, ExtractResponse, GenerateRequest, QuestionsRequest, QuestionsResponse,
    RefineRequest, SuggestionsRequest, SuggestionsResponse, UseCaseEntry,
};
pub use handlers::ModelingHandlers;
pub use routes::modeling_routes;
