//! The set of stores holding one modeling session's artifacts.

use std::sync::Arc;

use crate::domain::foundation::{TermName, UseCase};
use crate::domain::modeling::{
    generate_diagram, generate_markdown, Aggregate, Command, DomainModelResult, Entity, Event,
    UbiquitousLanguage, ValueObject,
};
use crate::ports::{KeyValueStore, StorageError};

use super::document::{
    AggregateRepository, CommandRepository, Document, EntityRepository, EventRepository,
    ValueObjectRepository,
};
use super::glossary::{GlossaryKey, TermRepository, UseCaseRepository};

/// Repositories for every modeling artifact, opened from one store factory.
#[derive(Clone)]
pub struct ModelingWorkspace {
    entities: EntityRepository,
    value_objects: ValueObjectRepository,
    aggregates: AggregateRepository,
    events: EventRepository,
    commands: CommandRepository,
    terms: TermRepository,
    use_cases: UseCaseRepository,
}

impl ModelingWorkspace {
    /// Names of every store the workspace opens.
    pub const STORE_NAMES: [&'static str; 7] = [
        Entity::STORE_NAME,
        ValueObject::STORE_NAME,
        Aggregate::STORE_NAME,
        Event::STORE_NAME,
        Command::STORE_NAME,
        TermName::STORE_NAME,
        UseCase::STORE_NAME,
    ];

    /// Opens each store by name through `open`.
    pub fn open<F>(open: F) -> Self
    where
        F: Fn(&'static str) -> Arc<dyn KeyValueStore>,
    {
        Self {
            entities: EntityRepository::new(open(Entity::STORE_NAME)),
            value_objects: ValueObjectRepository::new(open(ValueObject::STORE_NAME)),
            aggregates: AggregateRepository::new(open(Aggregate::STORE_NAME)),
            events: EventRepository::new(open(Event::STORE_NAME)),
            commands: CommandRepository::new(open(Command::STORE_NAME)),
            terms: TermRepository::new(open(TermName::STORE_NAME)),
            use_cases: UseCaseRepository::new(open(UseCase::STORE_NAME)),
        }
    }

    pub fn entities(&self) -> &EntityRepository {
        &self.entities
    }

    pub fn value_objects(&self) -> &ValueObjectRepository {
        &self.value_objects
    }

    pub fn aggregates(&self) -> &AggregateRepository {
        &self.aggregates
    }

    pub fn events(&self) -> &EventRepository {
        &self.events
    }

    pub fn commands(&self) -> &CommandRepository {
        &self.commands
    }

    pub fn terms(&self) -> &TermRepository {
        &self.terms
    }

    pub fn use_cases(&self) -> &UseCaseRepository {
        &self.use_cases
    }

    /// Saves extracted terms, replacing definitions of terms already known.
    pub async fn record_terms(&self, terms: &[UbiquitousLanguage]) -> Result<(), StorageError> {
        for term in terms {
            self.terms.save(&term.name, &term.description).await?;
        }
        Ok(())
    }

    /// Saves use cases that are not stored yet, with an empty description.
    pub async fn record_use_cases(&self, use_cases: &[UseCase]) -> Result<(), StorageError> {
        for use_case in use_cases {
            if self.use_cases.get(use_case).await?.is_none() {
                self.use_cases.save(use_case, "").await?;
            }
        }
        Ok(())
    }

    /// All stored terms with their descriptions.
    pub async fn stored_terms(&self) -> Result<Vec<UbiquitousLanguage>, StorageError> {
        Ok(self
            .terms
            .entries()
            .await?
            .into_iter()
            .map(|(name, description)| UbiquitousLanguage::new(name, description))
            .collect())
    }

    /// Replaces the stored entities, value objects, aggregates, events and
    /// commands with those of `model`.
    ///
    /// Bounded contexts and relationships have no store and are not kept.
    pub async fn replace_model(&self, model: &DomainModelResult) -> Result<(), StorageError> {
        self.clear_model().await?;

        for entity in &model.entities {
            self.entities.save(entity).await?;
        }
        for value_object in &model.value_objects {
            self.value_objects.save(value_object).await?;
        }
        for aggregate in &model.aggregates {
            self.aggregates.save(aggregate).await?;
        }
        for event in &model.events {
            self.events.save(event).await?;
        }
        for command in &model.commands {
            self.commands.save(command).await?;
        }

        tracing::info!(
            entities = model.entities.len(),
            aggregates = model.aggregates.len(),
            events = model.events.len(),
            "Domain model stored"
        );
        Ok(())
    }

    /// The stored artifacts assembled into a model.
    pub async fn current_model(&self) -> Result<DomainModelResult, StorageError> {
        Ok(DomainModelResult {
            entities: self.entities.list().await?,
            value_objects: self.value_objects.list().await?,
            aggregates: self.aggregates.list().await?,
            events: self.events.list().await?,
            commands: self.commands.list().await?,
            ..Default::default()
        })
    }

    pub async fn export_markdown(&self) -> Result<String, StorageError> {
        let model = self.current_model().await?;
        Ok(generate_markdown(
            &model.entities,
            &model.value_objects,
            &model.aggregates,
            &model.events,
            &model.commands,
        ))
    }

    pub async fn export_diagram(&self) -> Result<String, StorageError> {
        let model = self.current_model().await?;
        Ok(generate_diagram(
            &model.entities,
            &model.value_objects,
            &model.aggregates,
        ))
    }

    /// Empties every modeling store, glossaries included.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.clear_model().await?;
        self.terms.clear().await?;
        self.use_cases.clear().await?;
        tracing::info!("Modeling workspace cleared");
        Ok(())
    }

    async fn clear_model(&self) -> Result<(), StorageError> {
        self.entities.clear().await?;
        self.value_objects.clear().await?;
        self.aggregates.clear().await?;
        self.events.clear().await?;
        self.commands.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use std::collections::BTreeMap;

    fn workspace() -> ModelingWorkspace {
        ModelingWorkspace::open(|name| Arc::new(InMemoryStore::new(name)))
    }

    fn sample_model() -> DomainModelResult {
        let customer = Entity::new("Customer", BTreeMap::new());
        let placed = Event::new("OrderPlaced", "", vec![customer.clone()], vec![]);
        DomainModelResult {
            entities: vec![customer.clone()],
            value_objects: vec![ValueObject::new("Money", None)],
            aggregates: vec![Aggregate::new("Customers", customer, vec![], vec![])],
            commands: vec![Command::new("PlaceOrder", "", placed.clone())],
            events: vec![placed],
            ..Default::default()
        }
    }

    #[test]
    fn store_names_are_distinct() {
        let mut names = ModelingWorkspace::STORE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ModelingWorkspace::STORE_NAMES.len());
    }

    #[tokio::test]
    async fn replace_model_round_trips_through_stores() {
        let workspace = workspace();
        let model = sample_model();

        workspace.replace_model(&model).await.unwrap();
        let stored = workspace.current_model().await.unwrap();

        assert_eq!(stored.entities, model.entities);
        assert_eq!(stored.aggregates, model.aggregates);
        assert_eq!(stored.events, model.events);
        assert_eq!(stored.commands, model.commands);
    }

    #[tokio::test]
    async fn replace_model_drops_previous_artifacts() {
        let workspace = workspace();
        workspace.replace_model(&sample_model()).await.unwrap();

        let smaller = DomainModelResult {
            entities: vec![Entity::new("Invoice", BTreeMap::new())],
            ..Default::default()
        };
        workspace.replace_model(&smaller).await.unwrap();

        let stored = workspace.current_model().await.unwrap();
        assert_eq!(stored.entities.len(), 1);
        assert_eq!(stored.entities[0].name.as_str(), "Invoice");
        assert!(stored.commands.is_empty());
    }

    #[tokio::test]
    async fn record_use_cases_keeps_existing_descriptions() {
        let workspace = workspace();
        let checkout = UseCase::new("Checkout");
        workspace
            .use_cases()
            .save(&checkout, "Customer pays for the cart")
            .await
            .unwrap();

        workspace
            .record_use_cases(&[checkout.clone(), UseCase::new("Refund")])
            .await
            .unwrap();

        assert_eq!(
            workspace.use_cases().get(&checkout).await.unwrap().as_deref(),
            Some("Customer pays for the cart")
        );
        assert_eq!(workspace.use_cases().list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn record_terms_then_read_back() {
        let workspace = workspace();
        workspace
            .record_terms(&[UbiquitousLanguage::new("Order", "A purchase request")])
            .await
            .unwrap();

        let terms = workspace.stored_terms().await.unwrap();
        assert_eq!(terms, vec![UbiquitousLanguage::new("Order", "A purchase request")]);
    }

    #[tokio::test]
    async fn clear_empties_everything() {
        let workspace = workspace();
        workspace.replace_model(&sample_model()).await.unwrap();
        workspace
            .record_terms(&[UbiquitousLanguage::new("Order", "")])
            .await
            .unwrap();

        workspace.clear().await.unwrap();

        assert!(workspace.current_model().await.unwrap().is_empty());
        assert!(workspace.stored_terms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exports_render_stored_model() {
        let workspace = workspace();
        workspace.replace_model(&sample_model()).await.unwrap();

        let markdown = workspace.export_markdown().await.unwrap();
        assert!(markdown.contains("### Customer"));

        let diagram = workspace.export_diagram().await.unwrap();
        assert!(diagram.contains("<<AggregateRoot>> Customer"));
    }
}
