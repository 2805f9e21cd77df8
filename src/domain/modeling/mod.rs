//! Modeling module - DDD artifacts, complete domain models and their exports.

mod artifacts;
mod export;
mod result;

pub use artifacts::{Aggregate, Command, Entity, Event, UbiquitousLanguage, ValueObject};
pub use export::{generate_diagram, generate_markdown};
pub use result::{BoundedContext, DomainModelResult, Relationship, RelationshipType};
