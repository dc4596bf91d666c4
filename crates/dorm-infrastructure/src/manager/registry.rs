//! Named registry
//!
//! Insertion-ordered arena keyed by name. Order matters: class ownership
//! scans follow registration order.

use dorm_domain::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct NamedRegistry<T> {
    kind: &'static str,
    entries: Vec<(String, T)>,
}

impl<T> NamedRegistry<T> {
    /// Empty registry; `kind` names entries in errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Add `value` under `name`, rejecting duplicates
    pub fn add(&mut self, name: impl Into<String>, value: T) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::duplicate_name(self.kind, name));
        }
        self.entries.push((name, value));
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    /// Entry `name`, NotFound when absent
    pub fn get(&self, name: &str) -> Result<&T> {
        self.find(name)
            .ok_or_else(|| Error::not_found(format!("{} \"{name}\"", self.kind)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    /// Remove and return entry `name`
    pub fn remove(&mut self, name: &str) -> Result<T> {
        let position = self
            .entries
            .iter()
            .position(|(entry, _)| entry == name)
            .ok_or_else(|| Error::not_found(format!("{} \"{name}\"", self.kind)))?;
        Ok(self.entries.remove(position).1)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
