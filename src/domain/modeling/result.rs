//! Complete domain model as produced by generation and refinement.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Aggregate, Command, Entity, Event, ValueObject};
use crate::domain::foundation::BoundedContextName;

/// A complete domain model with all its components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainModelResult {
    pub entities: Vec<Entity>,
    pub value_objects: Vec<ValueObject>,
    pub aggregates: Vec<Aggregate>,
    pub bounded_contexts: Vec<BoundedContext>,
    pub events: Vec<Event>,
    pub commands: Vec<Command>,
    pub relationships: Vec<Relationship>,
}

impl DomainModelResult {
    /// Returns true if the model contains no artifacts at all.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.value_objects.is_empty()
            && self.aggregates.is_empty()
            && self.bounded_contexts.is_empty()
            && self.events.is_empty()
            && self.commands.is_empty()
            && self.relationships.is_empty()
    }
}

/// A named scope within which the model's terms are unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedContext {
    pub name: BoundedContextName,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub aggregates: Vec<Aggregate>,
}

/// A directed relationship between two domain objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default = "generate_relationship_id")]
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    #[serde(default)]
    pub description: String,
}

fn generate_relationship_id() -> String {
    Uuid::new_v4().to_string()
}

/// Types of relationships between domain objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    Composition,
    Aggregation,
    Inheritance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_model_is_empty() {
        assert!(DomainModelResult::default().is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let model: DomainModelResult = serde_json::from_value(json!({
            "entities": [{"name": "Customer"}]
        }))
        .unwrap();

        assert_eq!(model.entities.len(), 1);
        assert!(model.aggregates.is_empty());
        assert!(model.relationships.is_empty());
        assert!(!model.is_empty());
    }

    #[test]
    fn relationship_type_uses_type_key() {
        let relationship: Relationship = serde_json::from_value(json!({
            "sourceId": "Order",
            "targetId": "Customer",
            "type": "ManyToOne"
        }))
        .unwrap();

        assert_eq!(relationship.kind, RelationshipType::ManyToOne);
        assert!(!relationship.id.is_empty());
        assert_eq!(relationship.description, "");
    }

    #[test]
    fn unknown_relationship_type_is_rejected() {
        let result: Result<Relationship, _> = serde_json::from_value(json!({
            "sourceId": "a",
            "targetId": "b",
            "type": "Friendship"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_sections_camel_case() {
        let json = serde_json::to_value(DomainModelResult::default()).unwrap();
        for key in [
            "entities",
            "valueObjects",
            "aggregates",
            "boundedContexts",
            "events",
            "commands",
            "relationships",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
