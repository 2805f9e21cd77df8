//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with `dto`, `handlers` and `routes`;
//! [`api_router`] mounts them under `/api`.

mod active_config;
mod error;
mod router;

pub mod llm;
pub mod modeling;

pub use active_config::ActiveLlmConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use llm::{llm_routes, LlmHandlers};
pub use modeling::{modeling_routes, ModelingHandlers};
pub use router::{api_router, health, HealthResponse, RouterOptions};
