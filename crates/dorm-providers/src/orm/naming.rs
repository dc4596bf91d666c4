//! Naming strategies

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::ports::orm::NamingStrategy;
use dorm_domain::value_objects::class_name::short_name;
use std::sync::Arc;

/// Uses the short class name as table and the property name as column
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamingStrategy;

impl NamingStrategy for DefaultNamingStrategy {
    fn class_to_table_name(&self, class: &str) -> String {
        short_name(class).to_string()
    }

    fn property_to_column_name(&self, property: &str, _class: &str) -> String {
        property.to_string()
    }
}

/// snake_case table and column names, optionally upper-cased
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscoreNamingStrategy {
    upper_case: bool,
}

impl UnderscoreNamingStrategy {
    /// Strategy producing upper-case names
    pub fn upper_case() -> Self {
        Self { upper_case: true }
    }

    fn underscore(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        let mut prev: Option<char> = None;
        let mut chars = name.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_uppercase() {
                let after_lower = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
                let acronym_end = prev.is_some_and(char::is_uppercase)
                    && chars.peek().is_some_and(|n| n.is_lowercase());
                if after_lower || acronym_end {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
            prev = Some(c);
        }

        if self.upper_case {
            out.to_uppercase()
        } else {
            out
        }
    }
}

impl NamingStrategy for UnderscoreNamingStrategy {
    fn class_to_table_name(&self, class: &str) -> String {
        self.underscore(short_name(class))
    }

    fn property_to_column_name(&self, property: &str, _class: &str) -> String {
        self.underscore(property)
    }

    fn reference_column_name(&self) -> String {
        if self.upper_case { "ID" } else { "id" }.to_string()
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_NAMING: ComponentEntry = ComponentEntry {
    name: "orm.naming.default",
    description: "Short class names and property names as-is",
    factory: || Component::new().provide::<dyn NamingStrategy>(Arc::new(DefaultNamingStrategy)),
};

#[linkme::distributed_slice(COMPONENTS)]
static UNDERSCORE_NAMING: ComponentEntry = ComponentEntry {
    name: "orm.naming.underscore",
    description: "snake_case table and column names",
    factory: || {
        Component::new()
            .provide::<dyn NamingStrategy>(Arc::new(UnderscoreNamingStrategy::default()))
    },
};
