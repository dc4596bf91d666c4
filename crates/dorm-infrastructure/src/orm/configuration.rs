//! Object mapper configuration
//!
//! Everything one entity manager needs besides its connection: proxy
//! settings, the mapping driver chain, the pluggable strategies, the cache
//! roles and the query tuning options.

use crate::cache::CacheCollector;
use crate::constants::DEFAULT_EAGER_FETCH_BATCH_SIZE;
use crate::orm::mapping::MappingDriverChain;
use dorm_domain::constants::DEFAULT_PROXY_NAMESPACE;
use dorm_domain::ports::cache::CacheProvider;
use dorm_domain::ports::orm::{
    EntityListenerResolver, NamingStrategy, QuoteStrategy, RepositoryFactory, TypedFieldMapper,
};
use dorm_providers::orm::{
    DefaultEntityListenerResolver, DefaultNamingStrategy, DefaultQuoteStrategy,
    DefaultRepositoryFactory, DefaultTypedFieldMapper,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Kinds of custom DQL functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DqlFunctionKind {
    Datetime,
    Numeric,
    String,
}

pub struct OrmConfiguration {
    proxy_dir: String,
    proxy_namespace: String,
    auto_generate_proxies: bool,
    metadata_driver: Arc<MappingDriverChain>,
    naming_strategy: Arc<dyn NamingStrategy>,
    quote_strategy: Arc<dyn QuoteStrategy>,
    entity_listener_resolver: Arc<dyn EntityListenerResolver>,
    typed_field_mapper: Arc<dyn TypedFieldMapper>,
    repository_factory: Arc<dyn RepositoryFactory>,
    datetime_functions: BTreeMap<String, String>,
    numeric_functions: BTreeMap<String, String>,
    string_functions: BTreeMap<String, String>,
    hydration_modes: BTreeMap<String, String>,
    filters: BTreeMap<String, String>,
    caches: CacheCollector,
    schema_ignore_classes: Vec<String>,
    eager_fetch_batch_size: usize,
    default_query_hints: BTreeMap<String, Value>,
    identity_generation_preferences: BTreeMap<String, String>,
}

impl OrmConfiguration {
    /// Configuration with the default strategies
    pub fn new(
        proxy_dir: impl Into<String>,
        metadata_driver: MappingDriverChain,
        caches: CacheCollector,
    ) -> Self {
        Self {
            proxy_dir: proxy_dir.into(),
            proxy_namespace: DEFAULT_PROXY_NAMESPACE.to_string(),
            auto_generate_proxies: true,
            metadata_driver: Arc::new(metadata_driver),
            naming_strategy: Arc::new(DefaultNamingStrategy),
            quote_strategy: Arc::new(DefaultQuoteStrategy),
            entity_listener_resolver: Arc::new(DefaultEntityListenerResolver::new()),
            typed_field_mapper: Arc::new(DefaultTypedFieldMapper),
            repository_factory: Arc::new(DefaultRepositoryFactory),
            datetime_functions: BTreeMap::new(),
            numeric_functions: BTreeMap::new(),
            string_functions: BTreeMap::new(),
            hydration_modes: BTreeMap::new(),
            filters: BTreeMap::new(),
            caches,
            schema_ignore_classes: Vec::new(),
            eager_fetch_batch_size: DEFAULT_EAGER_FETCH_BATCH_SIZE,
            default_query_hints: BTreeMap::new(),
            identity_generation_preferences: BTreeMap::new(),
        }
    }

    // Proxies

    pub fn proxy_dir(&self) -> &str {
        &self.proxy_dir
    }

    pub fn proxy_namespace(&self) -> &str {
        &self.proxy_namespace
    }

    pub fn set_proxy_namespace(&mut self, namespace: impl Into<String>) {
        self.proxy_namespace = namespace.into();
    }

    pub fn auto_generate_proxies(&self) -> bool {
        self.auto_generate_proxies
    }

    pub fn set_auto_generate_proxies(&mut self, auto_generate: bool) {
        self.auto_generate_proxies = auto_generate;
    }

    // Mapping and strategies

    pub fn metadata_driver(&self) -> &Arc<MappingDriverChain> {
        &self.metadata_driver
    }

    pub fn naming_strategy(&self) -> Arc<dyn NamingStrategy> {
        Arc::clone(&self.naming_strategy)
    }

    pub fn set_naming_strategy(&mut self, strategy: Arc<dyn NamingStrategy>) {
        self.naming_strategy = strategy;
    }

    pub fn quote_strategy(&self) -> Arc<dyn QuoteStrategy> {
        Arc::clone(&self.quote_strategy)
    }

    pub fn set_quote_strategy(&mut self, strategy: Arc<dyn QuoteStrategy>) {
        self.quote_strategy = strategy;
    }

    pub fn entity_listener_resolver(&self) -> Arc<dyn EntityListenerResolver> {
        Arc::clone(&self.entity_listener_resolver)
    }

    pub fn set_entity_listener_resolver(&mut self, resolver: Arc<dyn EntityListenerResolver>) {
        self.entity_listener_resolver = resolver;
    }

    pub fn typed_field_mapper(&self) -> Arc<dyn TypedFieldMapper> {
        Arc::clone(&self.typed_field_mapper)
    }

    pub fn set_typed_field_mapper(&mut self, mapper: Arc<dyn TypedFieldMapper>) {
        self.typed_field_mapper = mapper;
    }

    pub fn repository_factory(&self) -> Arc<dyn RepositoryFactory> {
        Arc::clone(&self.repository_factory)
    }

    pub fn set_repository_factory(&mut self, factory: Arc<dyn RepositoryFactory>) {
        self.repository_factory = factory;
    }

    // DQL functions, hydration modes and filters. Re-adding a name replaces it.

    fn functions(&self, kind: DqlFunctionKind) -> &BTreeMap<String, String> {
        match kind {
            DqlFunctionKind::Datetime => &self.datetime_functions,
            DqlFunctionKind::Numeric => &self.numeric_functions,
            DqlFunctionKind::String => &self.string_functions,
        }
    }

    /// Register a custom DQL function; names are case-insensitive
    pub fn add_custom_function(
        &mut self,
        kind: DqlFunctionKind,
        name: &str,
        component: impl Into<String>,
    ) {
        let functions = match kind {
            DqlFunctionKind::Datetime => &mut self.datetime_functions,
            DqlFunctionKind::Numeric => &mut self.numeric_functions,
            DqlFunctionKind::String => &mut self.string_functions,
        };
        functions.insert(name.to_lowercase(), component.into());
    }

    /// Component implementing the DQL function `name`
    pub fn custom_function(&self, kind: DqlFunctionKind, name: &str) -> Option<&str> {
        self.functions(kind)
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn custom_functions(&self, kind: DqlFunctionKind) -> &BTreeMap<String, String> {
        self.functions(kind)
    }

    pub fn add_custom_hydration_mode(&mut self, mode: impl Into<String>, component: impl Into<String>) {
        self.hydration_modes.insert(mode.into(), component.into());
    }

    pub fn custom_hydration_mode(&self, mode: &str) -> Option<&str> {
        self.hydration_modes.get(mode).map(String::as_str)
    }

    pub fn add_filter(&mut self, name: impl Into<String>, component: impl Into<String>) {
        self.filters.insert(name.into(), component.into());
    }

    pub fn filter_component(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    // Caches

    pub fn caches(&self) -> &CacheCollector {
        &self.caches
    }

    pub fn hydration_cache(&self) -> Arc<dyn CacheProvider> {
        self.caches.hydration()
    }

    pub fn metadata_cache(&self) -> Arc<dyn CacheProvider> {
        self.caches.metadata()
    }

    pub fn query_cache(&self) -> Arc<dyn CacheProvider> {
        self.caches.query()
    }

    pub fn result_cache(&self) -> Arc<dyn CacheProvider> {
        self.caches.result()
    }

    // Tuning

    pub fn schema_ignore_classes(&self) -> &[String] {
        &self.schema_ignore_classes
    }

    pub fn set_schema_ignore_classes(&mut self, classes: Vec<String>) {
        self.schema_ignore_classes = classes;
    }

    pub fn eager_fetch_batch_size(&self) -> usize {
        self.eager_fetch_batch_size
    }

    pub fn set_eager_fetch_batch_size(&mut self, size: usize) {
        self.eager_fetch_batch_size = size;
    }

    pub fn default_query_hints(&self) -> &BTreeMap<String, Value> {
        &self.default_query_hints
    }

    pub fn set_default_query_hint(&mut self, name: impl Into<String>, value: Value) {
        self.default_query_hints.insert(name.into(), value);
    }

    pub fn identity_generation_preferences(&self) -> &BTreeMap<String, String> {
        &self.identity_generation_preferences
    }

    pub fn set_identity_generation_preferences(&mut self, preferences: BTreeMap<String, String>) {
        self.identity_generation_preferences = preferences;
    }
}

impl fmt::Debug for OrmConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrmConfiguration")
            .field("proxy_dir", &self.proxy_dir)
            .field("proxy_namespace", &self.proxy_namespace)
            .field("auto_generate_proxies", &self.auto_generate_proxies)
            .field("mapped_namespaces", &self.metadata_driver.namespaces())
            .field("naming_strategy", &self.naming_strategy)
            .field("filters", &self.filters)
            .field("caches", &self.caches)
            .finish_non_exhaustive()
    }
}
