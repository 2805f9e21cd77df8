//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **FileStore** - One YAML file per named store
//! - **InMemoryStore** - Stores documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStore, InMemoryStore};
//!
//! // Production: file-based storage
//! let entities = FileStore::new("./data", "entities");
//!
//! // Testing: in-memory storage
//! let entities = InMemoryStore::new("entities");
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileStore;
pub use in_memory_store::InMemoryStore;
