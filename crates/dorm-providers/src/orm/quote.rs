//! Quote strategies
//!
//! The default strategy quotes only names declared with backticks in the
//! mapping (`` `order` ``); the ANSI strategy never quotes.

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::ports::dbal::DatabasePlatform;
use dorm_domain::ports::orm::QuoteStrategy;
use dorm_domain::value_objects::{ClassMetadata, FieldMapping};
use std::sync::Arc;

fn quote_marked(name: &str, platform: &dyn DatabasePlatform) -> String {
    match name.strip_prefix('`').and_then(|n| n.strip_suffix('`')) {
        Some(bare) => platform.quote_identifier(bare),
        None => name.to_string(),
    }
}

/// Quotes backtick-marked names with the platform quote character
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQuoteStrategy;

impl QuoteStrategy for DefaultQuoteStrategy {
    fn table_name(&self, metadata: &ClassMetadata, platform: &dyn DatabasePlatform) -> String {
        quote_marked(&metadata.table, platform)
    }

    fn column_name(&self, field: &FieldMapping, platform: &dyn DatabasePlatform) -> String {
        quote_marked(field.column.as_deref().unwrap_or(field.field.as_str()), platform)
    }
}

/// Leaves every name unquoted
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiQuoteStrategy;

impl QuoteStrategy for AnsiQuoteStrategy {
    fn table_name(&self, metadata: &ClassMetadata, _platform: &dyn DatabasePlatform) -> String {
        metadata.table.trim_matches('`').to_string()
    }

    fn column_name(&self, field: &FieldMapping, _platform: &dyn DatabasePlatform) -> String {
        field
            .column
            .as_deref()
            .unwrap_or(field.field.as_str())
            .trim_matches('`')
            .to_string()
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_QUOTE: ComponentEntry = ComponentEntry {
    name: "orm.quote.default",
    description: "Quote backtick-marked identifiers",
    factory: || Component::new().provide::<dyn QuoteStrategy>(Arc::new(DefaultQuoteStrategy)),
};

#[linkme::distributed_slice(COMPONENTS)]
static ANSI_QUOTE: ComponentEntry = ComponentEntry {
    name: "orm.quote.ansi",
    description: "Never quote identifiers",
    factory: || Component::new().provide::<dyn QuoteStrategy>(Arc::new(AnsiQuoteStrategy)),
};
