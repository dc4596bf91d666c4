//! Entity manager
//!
//! Ties a connection, an ORM configuration and the connection's event
//! manager together. Managed entities live in the identity map as JSON
//! values; persisting a class no mapping covers is rejected.

use crate::dbal::Connection;
use crate::events::EventManager;
use crate::orm::filters::FilterCollection;
use crate::orm::metadata_factory::ClassMetadataFactory;
use crate::orm::OrmConfiguration;
use dorm_domain::error::{Error, Result};
use dorm_domain::events::{EventArgs, ON_CLEAR, ON_FLUSH, POST_FLUSH, PRE_FLUSH, PRE_PERSIST};
use dorm_domain::ports::orm::ObjectRepository;
use dorm_domain::value_objects::class_name::real_class;
use dorm_domain::value_objects::{ClassMetadata, IdentityMap};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

pub struct EntityManager {
    name: String,
    connection: Arc<Connection>,
    configuration: Arc<OrmConfiguration>,
    event_manager: Arc<EventManager>,
    metadata_factory: ClassMetadataFactory,
    identity_map: Arc<IdentityMap>,
    repositories: RwLock<BTreeMap<String, Arc<dyn ObjectRepository>>>,
    filters: FilterCollection,
    scheduled: Mutex<Vec<(String, String)>>,
    open: AtomicBool,
}

impl EntityManager {
    pub fn new(
        name: impl Into<String>,
        connection: Arc<Connection>,
        configuration: OrmConfiguration,
        event_manager: Arc<EventManager>,
    ) -> Self {
        let name = name.into();
        let metadata_factory = ClassMetadataFactory::new(
            &configuration,
            Arc::clone(&event_manager),
            &name,
            connection.name(),
        );
        let filters = FilterCollection::new(configuration.filters().clone());
        Self {
            name,
            connection,
            configuration: Arc::new(configuration),
            event_manager,
            metadata_factory,
            identity_map: Arc::new(IdentityMap::new()),
            repositories: RwLock::new(BTreeMap::new()),
            filters,
            scheduled: Mutex::new(Vec::new()),
            open: AtomicBool::new(true),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::closed(format!("Entity manager \"{}\"", self.name)))
        }
    }

    /// Arguments for `event` fired by this manager
    fn event_args(&self, event: &str) -> EventArgs {
        EventArgs::new(event)
            .with_entity_manager(&self.name)
            .with_connection(self.connection.name())
    }

    fn identifier_of(metadata: &ClassMetadata, entity: &Value) -> Result<String> {
        let identifier = metadata.identifier();
        if identifier.is_empty() {
            return Err(Error::mapping(format!(
                "Class \"{}\" has no identifier",
                metadata.class
            )));
        }

        let mut parts = identifier
            .iter()
            .map(|field| match entity.get(*field) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Null) | None => Err(Error::invalid_argument(format!(
                    "Entity of class \"{}\" has no value for identifier field \"{field}\"",
                    metadata.class
                ))),
                Some(other) => Ok(other.to_string()),
            })
            .collect::<Result<Vec<_>>>()?;

        // Composite keys are stored as a JSON array so no value can collide
        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(serde_json::to_string(&parts)?)
        }
    }

    /// Manage `entity` of `class`, returning its identifier
    pub fn persist(&self, class: &str, entity: Value) -> Result<String> {
        self.ensure_open()?;
        let class = real_class(class);
        if self.metadata_factory.is_transient(class) {
            return Err(Error::mapping(format!(
                "Class \"{class}\" is not a valid entity or mapped super class"
            )));
        }
        let metadata = self.metadata_factory.metadata_for(class)?;
        let id = Self::identifier_of(&metadata, &entity)?;

        self.event_manager.dispatch(
            &self
                .event_args(PRE_PERSIST)
                .with_class(class)
                .with_entity(entity.clone()),
        )?;

        self.identity_map.insert(class, &id, entity);
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((class.to_string(), id.clone()));
        debug!(entity_manager = %self.name, class, id = %id, "Persisted entity");
        Ok(id)
    }

    /// Managed entity of `class` with identifier `id`
    pub fn find(&self, class: &str, id: &str) -> Result<Option<Value>> {
        self.ensure_open()?;
        Ok(self.identity_map.get(real_class(class), id))
    }

    /// True when the entity is managed
    pub fn contains(&self, class: &str, id: &str) -> bool {
        self.identity_map.contains(real_class(class), id)
    }

    /// Number of entities persisted since the last flush
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Flush pending changes, returning how many entities were pending
    pub fn flush(&self) -> Result<usize> {
        self.ensure_open()?;
        self.event_manager.dispatch(&self.event_args(PRE_FLUSH))?;
        self.event_manager.dispatch(&self.event_args(ON_FLUSH))?;

        let flushed = std::mem::take(
            &mut *self.scheduled.lock().unwrap_or_else(PoisonError::into_inner),
        );

        self.event_manager.dispatch(&self.event_args(POST_FLUSH))?;
        debug!(entity_manager = %self.name, count = flushed.len(), "Flushed");
        Ok(flushed.len())
    }

    /// Detach every managed entity
    pub fn clear(&self) -> Result<()> {
        self.identity_map.clear();
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.event_manager.dispatch(&self.event_args(ON_CLEAR))
    }

    /// Clear and close; a closed manager rejects further work
    pub fn close(&self) -> Result<()> {
        self.clear()?;
        self.open.store(false, Ordering::SeqCst);
        info!(entity_manager = %self.name, "Closed entity manager");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Repository of `class`, created once per class
    pub fn get_repository(&self, class: &str) -> Result<Arc<dyn ObjectRepository>> {
        let class = real_class(class);
        if let Some(repository) = self
            .repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
        {
            return Ok(Arc::clone(repository));
        }

        let metadata = self.metadata_factory.metadata_for(class)?;
        let repository = self
            .configuration
            .repository_factory()
            .create_repository(metadata, Arc::clone(&self.identity_map));

        Ok(Arc::clone(
            self.repositories
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(class.to_string())
                .or_insert(repository),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    pub fn configuration(&self) -> &Arc<OrmConfiguration> {
        &self.configuration
    }

    pub fn event_manager(&self) -> &Arc<EventManager> {
        &self.event_manager
    }

    pub fn metadata_factory(&self) -> &ClassMetadataFactory {
        &self.metadata_factory
    }

    pub fn identity_map(&self) -> &Arc<IdentityMap> {
        &self.identity_map
    }

    pub fn filters(&self) -> &FilterCollection {
        &self.filters
    }
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("name", &self.name)
            .field("connection", &self.connection.name())
            .field("open", &self.is_open())
            .field("managed", &self.identity_map.len())
            .finish_non_exhaustive()
    }
}
