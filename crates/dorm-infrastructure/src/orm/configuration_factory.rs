//! Object mapper configuration factory

use crate::aliases::Aliases;
use crate::cache::CacheCollector;
use crate::config::{EntityManagerConfig, MappingConfig, ProxyConfig};
use crate::constants::{
    DECLARATIVE_MAPPING_EXTENSION, DEFAULT_EAGER_FETCH_BATCH_SIZE, XML_MAPPING_EXTENSION,
};
use crate::di::Injector;
use crate::orm::configuration::{DqlFunctionKind, OrmConfiguration};
use crate::orm::mapping::{
    AttributeDriver, DeclarativeDriver, MappingDriverChain, StaticCodeDriver, XmlDriver,
};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::orm::{
    EntityListenerResolver, MappingDriver, NamingStrategy, QuoteStrategy, RepositoryFactory,
    TypedFieldMapper,
};
use std::sync::Arc;
use tracing::debug;

/// Builds [`OrmConfiguration`] from `[[orm.entity_managers]]` blocks
#[derive(Debug, Clone)]
pub struct OrmConfigurationFactory {
    aliases: Aliases,
    caches: CacheCollector,
    injector: Arc<Injector>,
}

impl OrmConfigurationFactory {
    pub fn new(aliases: Aliases, caches: CacheCollector, injector: Arc<Injector>) -> Self {
        Self {
            aliases,
            caches,
            injector,
        }
    }

    pub fn create(
        &self,
        config: &EntityManagerConfig,
        proxies: &ProxyConfig,
    ) -> Result<OrmConfiguration> {
        let proxy_path = proxies
            .path
            .as_deref()
            .ok_or_else(|| Error::configuration("Not found path proxies"))?;
        let proxy_dir = self.aliases.get(proxy_path)?;

        let chain = self.create_driver_chain(&config.mappings)?;

        let mut configuration = OrmConfiguration::new(proxy_dir, chain, self.caches.clone());
        configuration.set_proxy_namespace(proxies.namespace.clone());
        configuration.set_auto_generate_proxies(proxies.auto_generate);

        let injector = &self.injector;
        if let Some(strategy) =
            injector.make_optional::<dyn NamingStrategy>(config.naming_strategy.as_deref())?
        {
            configuration.set_naming_strategy(strategy);
        }
        if let Some(strategy) =
            injector.make_optional::<dyn QuoteStrategy>(config.quote_strategy.as_deref())?
        {
            configuration.set_quote_strategy(strategy);
        }
        if let Some(resolver) = injector
            .make_optional::<dyn EntityListenerResolver>(config.entity_listener_resolver.as_deref())?
        {
            configuration.set_entity_listener_resolver(resolver);
        }
        if let Some(mapper) =
            injector.make_optional::<dyn TypedFieldMapper>(config.typed_field_mapper.as_deref())?
        {
            configuration.set_typed_field_mapper(mapper);
        }
        if let Some(factory) =
            injector.make_optional::<dyn RepositoryFactory>(config.repository_factory.as_deref())?
        {
            configuration.set_repository_factory(factory);
        }

        let functions = [
            (DqlFunctionKind::Datetime, &config.dql.custom_datetime_functions),
            (DqlFunctionKind::Numeric, &config.dql.custom_numeric_functions),
            (DqlFunctionKind::String, &config.dql.custom_string_functions),
        ];
        for (kind, entries) in functions {
            for (name, component) in entries {
                configuration.add_custom_function(kind, name, component.clone());
            }
        }
        for (mode, component) in &config.custom_hydration_modes {
            configuration.add_custom_hydration_mode(mode.clone(), component.clone());
        }
        for (name, component) in &config.filters {
            configuration.add_filter(name.clone(), component.clone());
        }

        configuration.set_schema_ignore_classes(config.schema_ignore_classes.clone());
        configuration.set_eager_fetch_batch_size(
            config
                .fetch_mode_sub_select_batch_size
                .unwrap_or(DEFAULT_EAGER_FETCH_BATCH_SIZE),
        );
        for (hint, value) in &config.default_query_hints {
            configuration.set_default_query_hint(hint.clone(), value.clone());
        }
        configuration
            .set_identity_generation_preferences(config.identity_generation_preferences.clone());

        debug!(entity_manager = %config.name, "Created ORM configuration");
        Ok(configuration)
    }

    /// One driver per mapping, keyed by namespace
    ///
    /// `driver`, `dir` and `namespace` are checked in that order.
    pub fn create_driver_chain(&self, mappings: &[MappingConfig]) -> Result<MappingDriverChain> {
        let mut chain = MappingDriverChain::new();

        for mapping in mappings {
            let kind = mapping
                .driver
                .as_deref()
                .ok_or_else(|| Error::configuration("Not found \"driver\" mapping"))?;
            let dir = mapping
                .dir
                .as_deref()
                .ok_or_else(|| Error::configuration("Not found \"dir\" mapping"))?;
            let namespace = mapping
                .namespace
                .as_deref()
                .ok_or_else(|| Error::configuration("Not found \"namespace\" mapping"))?;

            let dir = self.aliases.get(dir)?;
            let extension = mapping.file_extension.as_deref();

            let driver: Arc<dyn MappingDriver> = match kind {
                "attribute" => Arc::new(AttributeDriver::new(namespace, dir)),
                "static_php" => Arc::new(StaticCodeDriver::new(namespace)),
                "xml" => Arc::new(XmlDriver::new(
                    dir,
                    namespace,
                    extension.unwrap_or(XML_MAPPING_EXTENSION),
                )),
                "php" => Arc::new(DeclarativeDriver::new(
                    dir,
                    namespace,
                    extension.unwrap_or(DECLARATIVE_MAPPING_EXTENSION),
                )),
                other => {
                    return Err(Error::configuration(format!(
                        "Mapping driver \"{other}\" not found, expected one of \"attribute\", \"php\", \"static_php\", \"xml\""
                    )));
                }
            };

            debug!(kind, namespace, "Added mapping driver");
            chain.add_driver(driver, namespace);
        }

        Ok(chain)
    }
}
