//! HTTP adapter for LLM configuration endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    LlmConfigResponse, ModelsQuery, ModelsResponse, SaveLlmConfigRequest, ValidateKeyRequest,
    ValidateKeyResponse,
};
pub use handlers::LlmHandlers;
pub use routes::llm_routes;
