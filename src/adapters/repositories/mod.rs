//! Repositories over named key-value stores.
//!
//! Each artifact kind owns one isolated store. Repositories are built with
//! an injected store handle; failures are logged and surfaced as
//! [`StorageError`](crate::ports::StorageError).

mod document;
mod glossary;
mod llm_config;
mod workspace;

pub use document::{
    AggregateRepository, CommandRepository, Document, DocumentRepository, EntityRepository,
    EventRepository, ValueObjectRepository,
};
pub use glossary::{GlossaryKey, GlossaryRepository, TermRepository, UseCaseRepository};
pub use llm_config::LlmConfigRepository;
pub use workspace::ModelingWorkspace;
