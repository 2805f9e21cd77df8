//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Named document store backing the repositories
//! - `LlmGateway` - Sends prompts to the configured LLM provider

mod key_value_store;
mod llm_gateway;

pub use key_value_store::{KeyValueStore, StorageError};
pub use llm_gateway::{LlmError, LlmGateway};
