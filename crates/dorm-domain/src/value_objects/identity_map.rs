//! Identity map
//!
//! In-memory map of managed entities, keyed by class and identifier.
//! Entities are kept as JSON values; hydration is not this crate's concern.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

type ClassEntries = BTreeMap<String, Value>;

/// Managed entities of one entity manager
#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: RwLock<BTreeMap<String, ClassEntries>>,
}

impl IdentityMap {
    /// Create an empty identity map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, replacing any previous value with the same id
    pub fn insert(&self, class: &str, id: &str, entity: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(class.to_string())
            .or_default()
            .insert(id.to_string(), entity);
    }

    /// Managed entity by class and id
    pub fn get(&self, class: &str, id: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .and_then(|entities| entities.get(id))
            .cloned()
    }

    /// True when the entity is managed
    pub fn contains(&self, class: &str, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .is_some_and(|entities| entities.contains_key(id))
    }

    /// Detach one entity, returning it
    pub fn remove(&self, class: &str, id: &str) -> Option<Value> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entities = entries.get_mut(class)?;
        let removed = entities.remove(id);
        if entities.is_empty() {
            entries.remove(class);
        }
        removed
    }

    /// All managed entities of a class
    pub fn entities_of(&self, class: &str) -> Vec<(String, Value)> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .map(|entities| {
                entities
                    .iter()
                    .map(|(id, value)| (id.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Detach every entity
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of managed entities
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    /// True when nothing is managed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
