//! Domain Modeler - LLM-assisted domain-driven design
//!
//! Turns free-form business descriptions into ubiquitous language terms,
//! use cases, and a domain model (entities, value objects, aggregates,
//! events and commands) by prompting a configurable LLM provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
