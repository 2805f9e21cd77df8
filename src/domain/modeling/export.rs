//! Export of modeling artifacts as Markdown documents and Mermaid diagrams.

use std::collections::BTreeSet;
use std::fmt::Write;

use super::{Aggregate, Command, Entity, Event, ValueObject};

const EMPTY_SECTION: &str = "_None yet._\n\n";

/// Renders artifacts as a Markdown document.
pub fn generate_markdown(
    entities: &[Entity],
    value_objects: &[ValueObject],
    aggregates: &[Aggregate],
    events: &[Event],
    commands: &[Command],
) -> String {
    let mut doc = String::from("# Domain Model\n\n");

    doc.push_str("## Entities\n\n");
    if entities.is_empty() {
        doc.push_str(EMPTY_SECTION);
    }
    for entity in entities {
        let _ = writeln!(doc, "### {}\n", entity.name);
        if entity.properties.is_empty() {
            doc.push_str("_No properties._\n\n");
            continue;
        }
        for (key, property) in &entity.properties {
            let _ = writeln!(doc, "- **{}**: {}", key, display_value(property));
        }
        doc.push('\n');
    }

    doc.push_str("## Value Objects\n\n");
    if value_objects.is_empty() {
        doc.push_str(EMPTY_SECTION);
    } else {
        for value_object in value_objects {
            let _ = writeln!(
                doc,
                "- **{}**: {}",
                value_object.name,
                display_value(value_object)
            );
        }
        doc.push('\n');
    }

    doc.push_str("## Aggregates\n\n");
    if aggregates.is_empty() {
        doc.push_str(EMPTY_SECTION);
    }
    for aggregate in aggregates {
        let _ = writeln!(doc, "### {}\n", aggregate.name);
        let _ = writeln!(doc, "- Root: {}", aggregate.root.name);
        if !aggregate.entities.is_empty() {
            let _ = writeln!(doc, "- Entities: {}", join_names(&aggregate.entities, |e| e.name.as_str()));
        }
        if !aggregate.value_objects.is_empty() {
            let _ = writeln!(
                doc,
                "- Value Objects: {}",
                join_names(&aggregate.value_objects, |v| v.name.as_str())
            );
        }
        doc.push('\n');
    }

    doc.push_str("## Events\n\n");
    if events.is_empty() {
        doc.push_str(EMPTY_SECTION);
    }
    for event in events {
        let _ = writeln!(doc, "### {}\n", event.name);
        if !event.description.is_empty() {
            let _ = writeln!(doc, "{}\n", event.description);
        }
        if !event.related_entities.is_empty() {
            let _ = writeln!(
                doc,
                "- Related entities: {}",
                join_names(&event.related_entities, |e| e.name.as_str())
            );
        }
        if !event.related_value_objects.is_empty() {
            let _ = writeln!(
                doc,
                "- Related value objects: {}",
                join_names(&event.related_value_objects, |v| v.name.as_str())
            );
        }
        doc.push('\n');
    }

    doc.push_str("## Commands\n\n");
    if commands.is_empty() {
        doc.push_str(EMPTY_SECTION);
    }
    for command in commands {
        let _ = writeln!(doc, "### {}\n", command.name);
        if !command.description.is_empty() {
            let _ = writeln!(doc, "{}\n", command.description);
        }
        let _ = writeln!(doc, "- Triggers: {}\n", command.triggered_event.name);
    }

    doc.trim_end().to_string() + "\n"
}

/// Renders entities, value objects and aggregates as a Mermaid class diagram.
///
/// Aggregate roots compose their member entities; entities point at the
/// value objects held in their properties.
pub fn generate_diagram(
    entities: &[Entity],
    value_objects: &[ValueObject],
    aggregates: &[Aggregate],
) -> String {
    let mut diagram = String::from("classDiagram\n");
    let mut declared = BTreeSet::new();

    for entity in entities {
        let class = class_name(entity.name.as_str());
        let _ = writeln!(diagram, "    class {} {{", class);
        for (key, property) in &entity.properties {
            let _ = writeln!(diagram, "        +{} {}", class_name(property.name.as_str()), class_name(key));
        }
        diagram.push_str("    }\n");
        declared.insert(class);
    }

    for value_object in value_objects {
        let class = class_name(value_object.name.as_str());
        if declared.insert(class.clone()) {
            let _ = writeln!(diagram, "    class {}", class);
        }
        let _ = writeln!(diagram, "    <<ValueObject>> {}", class);
    }

    let mut edges = BTreeSet::new();

    for aggregate in aggregates {
        let root = class_name(aggregate.root.name.as_str());
        let _ = writeln!(diagram, "    <<AggregateRoot>> {}", root);
        for member in &aggregate.entities {
            edges.insert(format!("    {} *-- {}", root, class_name(member.name.as_str())));
        }
        for value_object in &aggregate.value_objects {
            edges.insert(format!("    {} *-- {}", root, class_name(value_object.name.as_str())));
        }
    }

    for entity in entities {
        let source = class_name(entity.name.as_str());
        for property in entity.properties.values() {
            edges.insert(format!("    {} --> {}", source, class_name(property.name.as_str())));
        }
    }

    for edge in edges {
        diagram.push_str(&edge);
        diagram.push('\n');
    }

    diagram
}

fn display_value(value_object: &ValueObject) -> &str {
    value_object.value.as_deref().unwrap_or("_unset_")
}

fn join_names<T>(items: &[T], name: impl Fn(&T) -> &str) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(", ")
}

/// Mermaid identifiers allow only word characters.
fn class_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "Unnamed".to_string()
    } else {
        cleaned
    }
}
