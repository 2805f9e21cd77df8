//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, names, validation errors)
//! - `llm` - Provider selection, call configuration, prompts and responses
//! - `modeling` - DDD artifacts, domain model results and exports

pub mod foundation;
pub mod llm;
pub mod modeling;
