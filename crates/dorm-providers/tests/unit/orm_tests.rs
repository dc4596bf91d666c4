//! ORM strategy component tests

use dorm_application::ports::registry::find_component;
use dorm_domain::ports::orm::{
    EntityListenerResolver, NamingStrategy, QuoteStrategy, RepositoryFactory, TypedFieldMapper,
};
use dorm_domain::value_objects::{ClassMetadataBuilder, FieldMapping};

#[test]
fn test_naming_components_resolve() {
    let underscore = find_component("orm.naming.underscore").unwrap();
    let naming = (underscore.factory)().get::<dyn NamingStrategy>().unwrap();

    let mut builder = ClassMetadataBuilder::new("app::entity::BlogPost");
    builder.field(FieldMapping::new("publishedAt"));
    let metadata = builder.build(naming.as_ref());

    assert_eq!(metadata.table, "blog_post");
    assert_eq!(metadata.column_names(), vec!["published_at"]);
}

#[test]
fn test_default_naming_keeps_names() {
    let entry = find_component("orm.naming.default").unwrap();
    let naming = (entry.factory)().get::<dyn NamingStrategy>().unwrap();

    assert_eq!(naming.class_to_table_name("app::entity::BlogPost"), "BlogPost");
    assert_eq!(naming.property_to_column_name("publishedAt", "app::BlogPost"), "publishedAt");
}

#[test]
fn test_each_orm_component_provides_its_role() {
    let provides = |name: &str| (find_component(name).unwrap().factory)();

    assert!(provides("orm.quote.default").provides::<dyn QuoteStrategy>());
    assert!(provides("orm.quote.ansi").provides::<dyn QuoteStrategy>());
    assert!(provides("orm.listener_resolver.default").provides::<dyn EntityListenerResolver>());
    assert!(provides("orm.typed_field_mapper.default").provides::<dyn TypedFieldMapper>());
    assert!(provides("orm.repository_factory.default").provides::<dyn RepositoryFactory>());
}

#[test]
fn test_naming_component_lacks_other_roles() {
    let component = (find_component("orm.naming.default").unwrap().factory)();
    assert!(!component.provides::<dyn QuoteStrategy>());
}
