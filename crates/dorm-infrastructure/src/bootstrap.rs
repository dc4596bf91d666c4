//! Application bootstrap
//!
//! Composition root. Turns a validated [`AppConfig`] into the live
//! registry of connections and entity managers plus the migration
//! configurations.
//!
//! ```text
//! AppConfig → Aliases → CacheCollector ─┐
//!     │                                 ├→ Factories → DoctrineManager
//!     └→ Injector → TypeRegistry ───────┘          ↘ MigrationConfigurationRegistry
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//!
//! let em = context.manager().get_manager(None)?;
//! em.persist("App::Entity::User", serde_json::json!({ "id": 1 }))?;
//! em.flush()?;
//! ```

use crate::aliases::Aliases;
use crate::cache::{CacheCollector, CacheFactory};
use crate::config::loader::validate_app_config;
use crate::config::{AppConfig, DbalConfig, EntityManagerConfig};
use crate::dbal::{Connection, ConnectionFactory, TypeRegistry};
use crate::di::Injector;
use crate::events::EventManagerFactory;
use crate::manager::{
    ConnectionProvider, DoctrineManager, DoctrineManagerFactory, DynamicConnectionFactory,
    DynamicEntityManagerFactory, EntityManagerProvider,
};
use crate::migrations::{
    MigrationConfigurationFactory, MigrationConfigurationRegistry, MigrationDependencies,
};
use crate::orm::{EntityManager, EntityManagerFactory, OrmConfigurationFactory};
use dorm_domain::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Everything built at startup
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    aliases: Aliases,
    injector: Arc<Injector>,
    types: Arc<TypeRegistry>,
    caches: CacheCollector,
    manager: DoctrineManager,
    migrations: MigrationConfigurationRegistry,
    dynamic_connections: DynamicConnectionFactory,
    dynamic_entity_managers: DynamicEntityManagerFactory,
}

/// Bootstrap with link-time components only
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    init_app_with_injector(config, Arc::new(Injector::new()))
}

/// Bootstrap with `injector`, whose bindings override link-time components
pub fn init_app_with_injector(config: AppConfig, injector: Arc<Injector>) -> Result<AppContext> {
    validate_app_config(&config)?;

    let aliases = Aliases::new(&config.aliases);
    let types = Arc::new(TypeRegistry::new());
    let caches = CacheCollector::from_config(&config.cache, &CacheFactory::new(aliases.clone()))?;

    let connections = ConnectionFactory::new(Arc::clone(&injector), Arc::clone(&types));
    let entity_managers = EntityManagerFactory::new(
        OrmConfigurationFactory::new(aliases.clone(), caches.clone(), Arc::clone(&injector)),
        EventManagerFactory::new(Arc::clone(&injector)),
    );

    let manager = DoctrineManagerFactory::new(connections.clone(), entity_managers.clone())
        .create(&config)?;
    let migrations =
        MigrationConfigurationFactory::new(aliases.clone()).create_all(&config.migrations)?;

    info!(
        connections = ?manager.connection_names(),
        entity_managers = ?manager.manager_names(),
        migrations = ?migrations.names(),
        "Application initialized"
    );

    Ok(AppContext {
        dynamic_connections: DynamicConnectionFactory::new(connections),
        dynamic_entity_managers: DynamicEntityManagerFactory::new(
            entity_managers,
            config.orm.proxies.clone(),
        ),
        config: Arc::new(config),
        aliases,
        injector,
        types,
        caches,
        manager,
        migrations,
    })
}

impl AppContext {
    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    pub fn injector(&self) -> &Arc<Injector> {
        &self.injector
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    pub fn caches(&self) -> &CacheCollector {
        &self.caches
    }

    pub fn manager(&self) -> &DoctrineManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut DoctrineManager {
        &mut self.manager
    }

    pub fn migrations(&self) -> &MigrationConfigurationRegistry {
        &self.migrations
    }

    pub fn connection_provider(&self) -> ConnectionProvider<'_> {
        ConnectionProvider::new(&self.manager)
    }

    pub fn entity_manager_provider(&self) -> EntityManagerProvider<'_> {
        EntityManagerProvider::new(&self.manager)
    }

    /// Register a connection at runtime
    pub fn add_connection(&mut self, config: &DbalConfig) -> Result<Arc<Connection>> {
        self.dynamic_connections.create(&mut self.manager, config)
    }

    /// Register an entity manager at runtime
    pub fn add_entity_manager(&mut self, config: &EntityManagerConfig) -> Result<Arc<EntityManager>> {
        self.dynamic_entity_managers.create(&mut self.manager, config)
    }

    /// Target of migration configuration `name`
    pub fn migration_dependencies(&self, name: Option<&str>) -> Result<MigrationDependencies> {
        MigrationDependencies::resolve(&self.manager, &self.migrations, name)
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("connections", &self.manager.connection_names())
            .field("entity_managers", &self.manager.manager_names())
            .field("migrations", &self.migrations.names())
            .finish_non_exhaustive()
    }
}
