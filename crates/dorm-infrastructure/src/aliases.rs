//! Path aliases
//!
//! Paths in the configuration may start with an alias (`@runtime/proxies`).
//! Aliases are defined in the `[aliases]` table and may themselves refer to
//! other aliases. Paths without an alias only get `~` expanded.

use crate::constants::{ALIAS_MAX_DEPTH, ALIAS_PREFIX};
use dorm_domain::error::{Error, Result};
use std::collections::BTreeMap;

/// Alias table
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    aliases: BTreeMap<String, String>,
}

impl Aliases {
    /// Build the table; keys are normalized to start with `@`
    pub fn new(aliases: &BTreeMap<String, String>) -> Self {
        let aliases = aliases
            .iter()
            .map(|(alias, path)| {
                let alias = if alias.starts_with(ALIAS_PREFIX) {
                    alias.clone()
                } else {
                    format!("{ALIAS_PREFIX}{alias}")
                };
                (alias, path.trim_end_matches('/').to_string())
            })
            .collect();
        Self { aliases }
    }

    /// Define or replace an alias
    pub fn set(&mut self, alias: &str, path: &str) {
        let alias = if alias.starts_with(ALIAS_PREFIX) {
            alias.to_string()
        } else {
            format!("{ALIAS_PREFIX}{alias}")
        };
        self.aliases
            .insert(alias, path.trim_end_matches('/').to_string());
    }

    /// True when `alias` is defined
    pub fn has(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Resolve `path`
    ///
    /// `@name` and `@name/rest` are replaced by the alias value, recursively.
    /// An undefined alias is a configuration error.
    pub fn get(&self, path: &str) -> Result<String> {
        self.resolve(path, 0)
    }

    fn resolve(&self, path: &str, depth: usize) -> Result<String> {
        if !path.starts_with(ALIAS_PREFIX) {
            return Ok(shellexpand::tilde(path).into_owned());
        }
        if depth >= ALIAS_MAX_DEPTH {
            return Err(Error::configuration(format!(
                "Alias \"{path}\" nests deeper than {ALIAS_MAX_DEPTH} levels"
            )));
        }

        let (alias, rest) = match path.find('/') {
            Some(pos) => path.split_at(pos),
            None => (path, ""),
        };
        let Some(target) = self.aliases.get(alias) else {
            return Err(Error::configuration(format!("Invalid path alias: {alias}")));
        };

        self.resolve(&format!("{target}{rest}"), depth + 1)
    }

    /// Resolve every value of `paths`
    pub fn resolve_all(&self, paths: &BTreeMap<String, String>) -> Result<BTreeMap<String, String>> {
        paths
            .iter()
            .map(|(key, path)| Ok((key.clone(), self.get(path)?)))
            .collect()
    }
}
