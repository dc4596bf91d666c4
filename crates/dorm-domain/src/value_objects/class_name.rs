//! Class name helpers
//!
//! Classes are identified by `::`-separated paths such as
//! `app::entity::User`. Generated lazy proxies embed the [`PROXY_MARKER`]
//! segment in front of the class they stand in for.

use crate::constants::{ANONYMOUS_CLASS_FRAGMENT, CLASS_SEPARATOR, PROXY_MARKER};

/// True when the class is a generated lazy proxy
pub fn is_proxy(class: &str) -> bool {
    proxy_split(class).is_some()
}

/// Resolve a proxy class to the class it stands in for
///
/// Non-proxy classes are returned unchanged.
///
/// ```
/// use dorm_domain::value_objects::class_name::real_class;
///
/// assert_eq!(real_class("Proxies::__CG__::app::User"), "app::User");
/// assert_eq!(real_class("app::User"), "app::User");
/// ```
pub fn real_class(class: &str) -> &str {
    proxy_split(class).unwrap_or(class)
}

/// True for anonymous or closure types, which can never be mapped
pub fn is_anonymous(class: &str) -> bool {
    class.trim().is_empty() || class.contains(ANONYMOUS_CLASS_FRAGMENT)
}

/// Last path segment of a class
pub fn short_name(class: &str) -> &str {
    class.rsplit(CLASS_SEPARATOR).next().unwrap_or(class)
}

/// True when `class` lives inside `namespace` (segment aware)
pub fn in_namespace(class: &str, namespace: &str) -> bool {
    relative_to(class, namespace).is_some()
}

/// Path of `class` relative to `namespace`, if the class lives inside it
pub fn relative_to<'a>(class: &'a str, namespace: &str) -> Option<&'a str> {
    let namespace = namespace.trim_end_matches(CLASS_SEPARATOR);
    if namespace.is_empty() {
        return Some(class);
    }
    class
        .strip_prefix(namespace)?
        .strip_prefix(CLASS_SEPARATOR)
        .filter(|rest| !rest.is_empty())
}

/// Class path with `::` replaced by `.`, used for mapping file names
pub fn dotted(class: &str) -> String {
    class.replace(CLASS_SEPARATOR, ".")
}

fn proxy_split(class: &str) -> Option<&str> {
    let marker = format!("{PROXY_MARKER}{CLASS_SEPARATOR}");
    let start = class.find(&marker)?;
    let before_ok = start == 0 || class[..start].ends_with(CLASS_SEPARATOR);
    before_ok.then(|| &class[start + marker.len()..])
}
