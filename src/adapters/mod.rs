//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores (in-memory, YAML files)
//! - `repositories` - Typed repositories over named stores
//! - `llm` - Provider HTTP clients behind the LLM gateway port
//! - `http` - axum REST API

pub mod http;
pub mod llm;
pub mod repositories;
pub mod storage;

pub use llm::{LlmClient, LlmClientConfig, MockLlmGateway};
pub use repositories::{LlmConfigRepository, ModelingWorkspace};
pub use storage::{FileStore, InMemoryStore};
