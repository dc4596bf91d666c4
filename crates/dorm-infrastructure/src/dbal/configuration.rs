//! Per-connection DBAL configuration

use crate::config::DbalConfig;
use crate::di::Injector;
use crate::error_ext::ErrorContext;
use dorm_domain::error::Result;
use dorm_domain::ports::dbal::{AssetFilter, DbalType, Middleware, SchemaManagerFactory};
use dorm_providers::dbal::DefaultSchemaManagerFactory;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Settings of one connection
#[derive(Clone)]
pub struct DbalConfiguration {
    auto_commit: bool,
    middlewares: Vec<Arc<dyn Middleware>>,
    schema_assets_filter: Option<AssetFilter>,
    schema_assets_pattern: Option<String>,
    disable_type_comments: bool,
    schema_manager_factory: Arc<dyn SchemaManagerFactory>,
}

impl Default for DbalConfiguration {
    fn default() -> Self {
        Self {
            auto_commit: true,
            middlewares: Vec::new(),
            schema_assets_filter: None,
            schema_assets_pattern: None,
            disable_type_comments: false,
            schema_manager_factory: Arc::new(DefaultSchemaManagerFactory),
        }
    }
}

impl DbalConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    pub fn set_auto_commit(&mut self, auto_commit: bool) {
        self.auto_commit = auto_commit;
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    pub fn set_middlewares(&mut self, middlewares: Vec<Arc<dyn Middleware>>) {
        self.middlewares = middlewares;
    }

    pub fn schema_assets_filter(&self) -> Option<AssetFilter> {
        self.schema_assets_filter.clone()
    }

    pub fn schema_assets_pattern(&self) -> Option<&str> {
        self.schema_assets_pattern.as_deref()
    }

    /// Keep only assets whose name matches `pattern`
    pub fn set_schema_assets_filter(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)
            .config_context(format!("Invalid schema assets filter \"{pattern}\""))?;
        self.schema_assets_filter = Some(Arc::new(move |name: &str| regex.is_match(name)));
        self.schema_assets_pattern = Some(pattern.to_string());
        Ok(())
    }

    pub fn disable_type_comments(&self) -> bool {
        self.disable_type_comments
    }

    pub fn set_disable_type_comments(&mut self, disable: bool) {
        self.disable_type_comments = disable;
    }

    pub fn schema_manager_factory(&self) -> Arc<dyn SchemaManagerFactory> {
        Arc::clone(&self.schema_manager_factory)
    }

    pub fn set_schema_manager_factory(&mut self, factory: Arc<dyn SchemaManagerFactory>) {
        self.schema_manager_factory = factory;
    }

    /// Column comment marking `ty`, unless type comments are disabled
    pub fn type_comment(&self, ty: &dyn DbalType) -> Option<String> {
        (!self.disable_type_comments && ty.requires_sql_comment_hint())
            .then(|| format!("(DC2Type:{})", ty.name()))
    }
}

impl fmt::Debug for DbalConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbalConfiguration")
            .field("auto_commit", &self.auto_commit)
            .field("middlewares", &self.middlewares.len())
            .field("schema_assets_pattern", &self.schema_assets_pattern)
            .field("disable_type_comments", &self.disable_type_comments)
            .finish_non_exhaustive()
    }
}

/// Builds [`DbalConfiguration`] from a `[[dbal]]` block
#[derive(Debug, Clone)]
pub struct DbalConfigurationFactory {
    injector: Arc<Injector>,
}

impl DbalConfigurationFactory {
    pub fn new(injector: Arc<Injector>) -> Self {
        Self { injector }
    }

    pub fn create(&self, config: &DbalConfig) -> Result<DbalConfiguration> {
        let mut configuration = DbalConfiguration::new();

        configuration.set_auto_commit(config.auto_commit.unwrap_or(true));

        if let Some(pattern) = &config.schema_assets_filter {
            configuration.set_schema_assets_filter(pattern)?;
        }

        let middlewares = config
            .middlewares
            .iter()
            .map(|name| self.injector.make::<dyn Middleware>(name))
            .collect::<Result<Vec<_>>>()?;
        configuration.set_middlewares(middlewares);

        if config.disable_type_comments == Some(true) {
            configuration.set_disable_type_comments(true);
        }

        if let Some(factory) = self
            .injector
            .make_optional::<dyn SchemaManagerFactory>(config.schema_manager_factory.as_deref())?
        {
            configuration.set_schema_manager_factory(factory);
        }

        Ok(configuration)
    }
}
