//! Database Driver Registry
//!
//! Drivers register themselves in [`DATABASE_DRIVERS`] under a name and any
//! number of aliases; a connection selects one through `params.driver`.

use std::sync::Arc;

use dorm_domain::ports::dbal::Driver;
use dorm_domain::value_objects::ConnectionParams;

/// Registry entry for database drivers
pub struct DriverEntry {
    /// Canonical driver name
    pub name: &'static str,
    /// Alternative names accepted in `params.driver`
    pub aliases: &'static [&'static str],
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the driver
    pub factory: fn(&ConnectionParams) -> Result<Arc<dyn Driver>, String>,
}

impl DriverEntry {
    /// True when `name` selects this driver
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

#[linkme::distributed_slice]
pub static DATABASE_DRIVERS: [DriverEntry] = [..];

/// Resolve the driver selected by `params.driver`
pub fn resolve_driver(params: &ConnectionParams) -> Result<Arc<dyn Driver>, String> {
    let driver_name = params.driver.as_str();

    if let Some(entry) = DATABASE_DRIVERS.iter().find(|e| e.matches(driver_name)) {
        tracing::debug!(driver = entry.name, requested = driver_name, "Resolved database driver");
        return (entry.factory)(params);
    }

    let available: Vec<&str> = DATABASE_DRIVERS
        .iter()
        .flat_map(|e| std::iter::once(e.name).chain(e.aliases.iter().copied()))
        .collect();

    Err(format!(
        "Unknown database driver '{driver_name}'. Available drivers: {available:?}"
    ))
}

/// List all registered drivers as (name, description) tuples
pub fn list_drivers() -> Vec<(&'static str, &'static str)> {
    DATABASE_DRIVERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
