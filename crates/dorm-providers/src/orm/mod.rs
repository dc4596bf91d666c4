//! Default object mapper strategies
//!
//! Each strategy registers itself as a named component; entity manager
//! configurations select them by name.

pub mod listener_resolver;
pub mod naming;
pub mod quote;
pub mod repository;
pub mod typed_field_mapper;

pub use listener_resolver::DefaultEntityListenerResolver;
pub use naming::{DefaultNamingStrategy, UnderscoreNamingStrategy};
pub use quote::{AnsiQuoteStrategy, DefaultQuoteStrategy};
pub use repository::{DefaultRepositoryFactory, EntityRepository};
pub use typed_field_mapper::DefaultTypedFieldMapper;
