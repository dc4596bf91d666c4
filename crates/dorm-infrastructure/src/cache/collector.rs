//! Cache collector

use crate::cache::CacheFactory;
use crate::config::CacheConfig;
use dorm_domain::error::Result;
use dorm_domain::ports::cache::CacheProvider;
use dorm_providers::cache::NullCacheProvider;
use std::fmt;
use std::sync::Arc;

/// ORM cache role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRole {
    /// Hydrated results
    Hydration,
    /// Class metadata
    Metadata,
    /// Parsed queries
    Query,
    /// Query results
    Result,
}

impl CacheRole {
    pub const ALL: [CacheRole; 4] = [
        CacheRole::Hydration,
        CacheRole::Metadata,
        CacheRole::Query,
        CacheRole::Result,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheRole::Hydration => "hydration",
            CacheRole::Metadata => "metadata",
            CacheRole::Query => "query",
            CacheRole::Result => "result",
        }
    }

    /// Role named `name`
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl fmt::Display for CacheRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backends of the four cache roles, null unless configured
#[derive(Clone)]
pub struct CacheCollector {
    hydration: Arc<dyn CacheProvider>,
    metadata: Arc<dyn CacheProvider>,
    query: Arc<dyn CacheProvider>,
    result: Arc<dyn CacheProvider>,
}

impl Default for CacheCollector {
    fn default() -> Self {
        let null: Arc<dyn CacheProvider> = Arc::new(NullCacheProvider::new());
        Self {
            hydration: Arc::clone(&null),
            metadata: Arc::clone(&null),
            query: Arc::clone(&null),
            result: null,
        }
    }
}

impl CacheCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured role
    pub fn from_config(config: &CacheConfig, factory: &CacheFactory) -> Result<Self> {
        let mut collector = Self::new();
        let roles = [
            (CacheRole::Hydration, &config.hydration),
            (CacheRole::Metadata, &config.metadata),
            (CacheRole::Query, &config.query),
            (CacheRole::Result, &config.result),
        ];
        for (role, block) in roles {
            if let Some(block) = block {
                collector.set(role, factory.create(block)?);
            }
        }
        Ok(collector)
    }

    pub fn get(&self, role: CacheRole) -> Arc<dyn CacheProvider> {
        Arc::clone(match role {
            CacheRole::Hydration => &self.hydration,
            CacheRole::Metadata => &self.metadata,
            CacheRole::Query => &self.query,
            CacheRole::Result => &self.result,
        })
    }

    pub fn set(&mut self, role: CacheRole, provider: Arc<dyn CacheProvider>) {
        let slot = match role {
            CacheRole::Hydration => &mut self.hydration,
            CacheRole::Metadata => &mut self.metadata,
            CacheRole::Query => &mut self.query,
            CacheRole::Result => &mut self.result,
        };
        *slot = provider;
    }

    pub fn hydration(&self) -> Arc<dyn CacheProvider> {
        self.get(CacheRole::Hydration)
    }

    pub fn metadata(&self) -> Arc<dyn CacheProvider> {
        self.get(CacheRole::Metadata)
    }

    pub fn query(&self) -> Arc<dyn CacheProvider> {
        self.get(CacheRole::Query)
    }

    pub fn result(&self) -> Arc<dyn CacheProvider> {
        self.get(CacheRole::Result)
    }
}

impl fmt::Debug for CacheCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCollector")
            .field("hydration", &self.hydration.provider_name())
            .field("metadata", &self.metadata.provider_name())
            .field("query", &self.query.provider_name())
            .field("result", &self.result.provider_name())
            .finish()
    }
}
