//! Domain-driven-design artifacts produced by the modeler.
//!
//! All artifacts are plain values: aggregates, events and commands embed full
//! copies of the entities and value objects they mention rather than
//! references, so deleting an entity never touches the artifacts holding it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{
    AggregateName, CommandName, EntityId, EntityName, EventName, TermName, ValueObjectName,
};

/// An identity-bearing domain object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Generated when absent, so model JSON without ids still parses.
    #[serde(default)]
    pub id: EntityId,
    pub name: EntityName,
    #[serde(default)]
    pub properties: BTreeMap<String, ValueObject>,
}

impl Entity {
    /// Creates an entity with a freshly generated id.
    pub fn new(name: impl Into<EntityName>, properties: BTreeMap<String, ValueObject>) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            properties,
        }
    }

    /// Adds or replaces a property, keyed by the value object's name.
    pub fn with_property(mut self, value_object: ValueObject) -> Self {
        self.properties
            .insert(value_object.name.as_str().to_string(), value_object);
        self
    }
}

/// An immutable value described only by its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueObject {
    pub name: ValueObjectName,
    #[serde(default)]
    pub value: Option<String>,
}

impl ValueObject {
    pub fn new(name: impl Into<ValueObjectName>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A consistency boundary rooted at one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub name: AggregateName,
    pub root: Entity,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub value_objects: Vec<ValueObject>,
}

impl Aggregate {
    pub fn new(
        name: impl Into<AggregateName>,
        root: Entity,
        entities: Vec<Entity>,
        value_objects: Vec<ValueObject>,
    ) -> Self {
        Self {
            name: name.into(),
            root,
            entities,
            value_objects,
        }
    }
}

/// Something that happened in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: EventName,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub related_entities: Vec<Entity>,
    #[serde(default)]
    pub related_value_objects: Vec<ValueObject>,
}

impl Event {
    pub fn new(
        name: impl Into<EventName>,
        description: impl Into<String>,
        related_entities: Vec<Entity>,
        related_value_objects: Vec<ValueObject>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            related_entities,
            related_value_objects,
        }
    }
}

/// An intent to change the domain, which triggers an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub name: CommandName,
    #[serde(default)]
    pub description: String,
    pub triggered_event: Event,
}

impl Command {
    pub fn new(
        name: impl Into<CommandName>,
        description: impl Into<String>,
        triggered_event: Event,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            triggered_event,
        }
    }
}

/// A ubiquitous language term and what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UbiquitousLanguage {
    pub name: TermName,
    #[serde(default)]
    pub description: String,
}

impl UbiquitousLanguage {
    pub fn new(name: impl Into<TermName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
