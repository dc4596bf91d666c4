//! Metadata mapping drivers
//!
//! | Kind | Driver | Source |
//! |------|--------|--------|
//! | `attribute` | [`AttributeDriver`] | `ENTITIES` registry entries in the namespace |
//! | `static_php` | [`StaticCodeDriver`] | registry entries with a metadata loader |
//! | `xml` | [`XmlDriver`] | `<dir>/<relative.class.path>.orm.xml` |
//! | `php` | [`DeclarativeDriver`] | `<dir>/<full.class.path>.dcm.toml` |
//!
//! Each entity manager combines its mappings in a [`MappingDriverChain`].

pub mod attribute;
pub mod chain;
pub mod declarative;
pub mod locator;
pub mod static_code;
pub mod xml;

pub use attribute::AttributeDriver;
pub use chain::MappingDriverChain;
pub use declarative::DeclarativeDriver;
pub use locator::FileLocator;
pub use static_code::StaticCodeDriver;
pub use xml::XmlDriver;

use dorm_domain::error::Error;

/// Error for a class no driver of the chain can load
pub(crate) fn not_mapped(class: &str) -> Error {
    Error::mapping(format!(
        "Class \"{class}\" is not a valid entity or mapped super class"
    ))
}
