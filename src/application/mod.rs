//! Application layer - Modeling services.
//!
//! Services turn domain prompts into provider calls through the
//! [`LlmGateway`](crate::ports::LlmGateway) port and parse the replies into
//! domain artifacts.

pub mod services;

pub use services::{ModelExtractionService, ModelGenerationService, ModelRefinementService};
