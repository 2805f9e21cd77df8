//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that form the vocabulary of the
//! domain modeler.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{
    AggregateName, BoundedContextName, CommandName, EntityId, EntityName, EventName, TermName,
    UseCase, ValueObjectName,
};
