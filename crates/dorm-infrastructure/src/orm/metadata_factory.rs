//! Class metadata factory
//!
//! Loads metadata through the driver chain, completes it with the typed
//! field mapper and the naming strategy, and keeps it in memory and in the
//! metadata cache. `loadClassMetadata` fires only when a driver loaded the
//! class, never for cache hits.

use crate::events::EventManager;
use crate::orm::OrmConfiguration;
use crate::orm::mapping::MappingDriverChain;
use dorm_domain::constants::METADATA_CACHE_SUFFIX;
use dorm_domain::error::Result;
use dorm_domain::events::{EventArgs, LOAD_CLASS_METADATA};
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheProviderExt};
use dorm_domain::ports::orm::{MappingDriver, NamingStrategy, TypedFieldMapper};
use dorm_domain::value_objects::class_name::real_class;
use dorm_domain::value_objects::{ClassMetadata, ClassMetadataBuilder};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

pub struct ClassMetadataFactory {
    driver: Arc<MappingDriverChain>,
    naming: Arc<dyn NamingStrategy>,
    typed_field_mapper: Arc<dyn TypedFieldMapper>,
    cache: Arc<dyn CacheProvider>,
    event_manager: Arc<EventManager>,
    entity_manager: String,
    connection: String,
    loaded: RwLock<BTreeMap<String, Arc<ClassMetadata>>>,
}

impl ClassMetadataFactory {
    /// Factory of the entity manager `entity_manager` on `connection`
    pub fn new(
        configuration: &OrmConfiguration,
        event_manager: Arc<EventManager>,
        entity_manager: &str,
        connection: &str,
    ) -> Self {
        Self {
            driver: Arc::clone(configuration.metadata_driver()),
            naming: configuration.naming_strategy(),
            typed_field_mapper: configuration.typed_field_mapper(),
            cache: configuration.metadata_cache(),
            event_manager,
            entity_manager: entity_manager.to_string(),
            connection: connection.to_string(),
            loaded: RwLock::new(BTreeMap::new()),
        }
    }

    fn cache_key(class: &str) -> String {
        format!("{class}{METADATA_CACHE_SUFFIX}")
    }

    /// True when no mapping covers `class`; proxies are judged by their
    /// real class
    pub fn is_transient(&self, class: &str) -> bool {
        self.driver.is_transient(real_class(class))
    }

    /// True once metadata for `class` is loaded
    pub fn has_metadata_for(&self, class: &str) -> bool {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(real_class(class))
    }

    /// Metadata of `class`
    pub fn metadata_for(&self, class: &str) -> Result<Arc<ClassMetadata>> {
        let class = real_class(class);
        if let Some(metadata) = self
            .loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
        {
            return Ok(Arc::clone(metadata));
        }

        let key = Self::cache_key(class);
        let cached = self.cache.get::<ClassMetadata>(&key).unwrap_or_else(|e| {
            warn!(class, error = %e, "Metadata cache read failed");
            None
        });

        let metadata = match cached {
            Some(metadata) => Arc::new(metadata),
            None => {
                let metadata = Arc::new(self.load(class)?);
                if let Err(e) = self.cache.set(&key, metadata.as_ref(), CacheEntryConfig::new()) {
                    warn!(class, error = %e, "Metadata cache write failed");
                }
                metadata
            }
        };

        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class.to_string(), Arc::clone(&metadata));
        Ok(metadata)
    }

    fn load(&self, class: &str) -> Result<ClassMetadata> {
        let mut builder = ClassMetadataBuilder::new(class);
        self.driver.load_metadata_for_class(class, &mut builder)?;
        for field in builder.fields_mut() {
            self.typed_field_mapper.validate_and_complete(field);
        }
        let metadata = builder.build(self.naming.as_ref());

        debug!(class, table = %metadata.table, "Loaded class metadata");
        self.event_manager.dispatch(
            &EventArgs::new(LOAD_CLASS_METADATA)
                .with_class(class)
                .with_entity_manager(&self.entity_manager)
                .with_connection(&self.connection),
        )?;
        Ok(metadata)
    }

    /// Metadata of every mapped class
    pub fn all_metadata(&self) -> Result<Vec<Arc<ClassMetadata>>> {
        self.driver
            .all_class_names()?
            .iter()
            .map(|class| self.metadata_for(class))
            .collect()
    }

    /// Forget loaded metadata; the metadata cache is left untouched
    pub fn clear_loaded(&self) {
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl std::fmt::Debug for ClassMetadataFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loaded = self.loaded.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ClassMetadataFactory")
            .field("loaded", &loaded.keys().collect::<Vec<_>>())
            .field("cache", &self.cache.provider_name())
            .finish_non_exhaustive()
    }
}
