//! Class metadata builder tests

use dorm_domain::ports::NamingStrategy;
use dorm_domain::value_objects::{ClassMetadataBuilder, FieldMapping};

#[derive(Debug)]
struct LowercaseNaming;

impl NamingStrategy for LowercaseNaming {
    fn class_to_table_name(&self, class: &str) -> String {
        class.rsplit("::").next().unwrap_or(class).to_lowercase()
    }

    fn property_to_column_name(&self, property: &str, _class: &str) -> String {
        property.to_lowercase()
    }
}

#[test]
fn test_build_applies_naming_defaults() {
    let mut builder = ClassMetadataBuilder::new("app::entity::User");
    builder
        .field(FieldMapping::new("id").type_name("integer").id())
        .field(FieldMapping::new("Email").type_name("string"));

    let metadata = builder.build(&LowercaseNaming);

    assert_eq!(metadata.table, "user");
    assert_eq!(metadata.column_names(), vec!["id", "email"]);
    assert_eq!(metadata.identifier(), vec!["id"]);
}

#[test]
fn test_explicit_names_win() {
    let mut builder = ClassMetadataBuilder::new("app::entity::User");
    builder
        .table("users")
        .field(FieldMapping::new("email").column("email_address"));

    let metadata = builder.build(&LowercaseNaming);

    assert_eq!(metadata.table, "users");
    assert_eq!(
        metadata.field("email").and_then(|f| f.column.as_deref()),
        Some("email_address")
    );
}

#[test]
fn test_field_replaces_same_name() {
    let mut builder = ClassMetadataBuilder::new("app::entity::User");
    builder
        .field(FieldMapping::new("email").type_name("string"))
        .field(FieldMapping::new("email").type_name("text"));

    let metadata = builder.build(&LowercaseNaming);

    assert_eq!(metadata.fields.len(), 1);
    assert_eq!(metadata.fields[0].type_name.as_deref(), Some("text"));
}
