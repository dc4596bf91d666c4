//! Default schema manager

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::dbal::{
    AssetFilter, DatabasePlatform, DriverConnection, SchemaManager, SchemaManagerFactory,
};
use std::sync::Arc;
use tracing::info;

/// Schema manager applying the connection asset filter
pub struct DefaultSchemaManager {
    platform: Arc<dyn DatabasePlatform>,
    filter: Option<AssetFilter>,
}

impl SchemaManager for DefaultSchemaManager {
    fn platform(&self) -> Arc<dyn DatabasePlatform> {
        Arc::clone(&self.platform)
    }

    fn filter_asset_names(&self, names: &[String]) -> Vec<String> {
        match &self.filter {
            Some(filter) => names
                .iter()
                .filter(|name| filter(name.as_str()))
                .cloned()
                .collect(),
            None => names.to_vec(),
        }
    }

    fn list_databases(&self, conn: &mut dyn DriverConnection) -> Result<Vec<String>> {
        let sql = self.platform.list_databases_sql().ok_or_else(|| {
            Error::database(format!(
                "Platform \"{}\" cannot list databases",
                self.platform.name()
            ))
        })?;
        conn.fetch_first_column(&sql)
    }

    fn create_database(&self, conn: &mut dyn DriverConnection, name: &str) -> Result<()> {
        conn.execute_statement(&self.platform.create_database_sql(name))?;
        info!(database = name, "Created database");
        Ok(())
    }

    fn drop_database(&self, conn: &mut dyn DriverConnection, name: &str) -> Result<()> {
        conn.execute_statement(&self.platform.drop_database_sql(name))?;
        info!(database = name, "Dropped database");
        Ok(())
    }
}

/// Factory of [`DefaultSchemaManager`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSchemaManagerFactory;

impl SchemaManagerFactory for DefaultSchemaManagerFactory {
    fn create_schema_manager(
        &self,
        platform: Arc<dyn DatabasePlatform>,
        filter: Option<AssetFilter>,
    ) -> Arc<dyn SchemaManager> {
        Arc::new(DefaultSchemaManager { platform, filter })
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_SCHEMA_MANAGER_FACTORY: ComponentEntry = ComponentEntry {
    name: "dbal.schema_manager_factory.default",
    description: "Schema manager honouring the schema assets filter",
    factory: || {
        Component::new()
            .provide::<dyn SchemaManagerFactory>(Arc::new(DefaultSchemaManagerFactory))
    },
};
