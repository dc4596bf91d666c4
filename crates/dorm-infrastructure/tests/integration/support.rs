//! Shared fixtures: test entities and configuration builders

use dorm_application::ports::registry::{ENTITIES, EntityEntry};
use dorm_domain::error::Result;
use dorm_domain::events::EventArgs;
use dorm_domain::ports::events::EventListener;
use dorm_domain::value_objects::{ClassMetadataBuilder, ConnectionParams, FieldMapping};
use dorm_infrastructure::config::{
    AppConfig, ConfigBuilder, DbalConfig, EntityManagerConfig, MappingConfig,
};
use std::sync::Mutex;

pub const USER: &str = "app::entity::User";
pub const POST: &str = "app::entity::Post";
pub const TAG: &str = "blog::entity::Tag";
pub const ORDER_LINE: &str = "shop::entity::OrderLine";

fn user_metadata(builder: &mut ClassMetadataBuilder) {
    builder
        .field(FieldMapping::new("id").type_name("integer").id())
        .field(FieldMapping::new("emailAddress").type_name("string"));
}

fn tag_metadata(builder: &mut ClassMetadataBuilder) {
    builder.field(FieldMapping::new("slug").id());
}

fn order_line_metadata(builder: &mut ClassMetadataBuilder) {
    builder
        .field(FieldMapping::new("order").id())
        .field(FieldMapping::new("sku").id());
}

#[linkme::distributed_slice(ENTITIES)]
static USER_ENTITY: EntityEntry = EntityEntry {
    class: USER,
    table: Some("users"),
    load_metadata: Some(user_metadata),
};

// Mapped without a static loader
#[linkme::distributed_slice(ENTITIES)]
static POST_ENTITY: EntityEntry = EntityEntry {
    class: POST,
    table: None,
    load_metadata: None,
};

#[linkme::distributed_slice(ENTITIES)]
static TAG_ENTITY: EntityEntry = EntityEntry {
    class: TAG,
    table: None,
    load_metadata: Some(tag_metadata),
};

// Composite identifier
#[linkme::distributed_slice(ENTITIES)]
static ORDER_LINE_ENTITY: EntityEntry = EntityEntry {
    class: ORDER_LINE,
    table: Some("order_lines"),
    load_metadata: Some(order_line_metadata),
};

/// Connection on the memory driver
pub fn memory_connection(name: &str) -> DbalConfig {
    DbalConfig::new(name, ConnectionParams::new("memory").with_dbname(name))
}

/// Entity manager mapping `namespace` with registered classes
pub fn attribute_manager(name: &str, connection: &str, namespace: &str) -> EntityManagerConfig {
    EntityManagerConfig::new(name, connection)
        .with_mapping(MappingConfig::new("attribute", "src/entity", namespace))
}

/// Connections `default` and `mysql`, each with a matching entity manager
///
/// `default` maps `app::entity`; `mysql` maps `blog::entity` and `app::entity`.
pub fn two_connections() -> AppConfig {
    ConfigBuilder::new()
        .with_connection(memory_connection("default"))
        .with_connection(DbalConfig::new(
            "mysql",
            ConnectionParams::new("memory").with_platform("mysql"),
        ))
        .with_entity_manager(attribute_manager("default", "default", "app::entity"))
        .with_entity_manager(
            attribute_manager("mysql", "mysql", "blog::entity")
                .with_mapping(MappingConfig::new("attribute", "src/entity", "app::entity")),
        )
        .with_proxy_path("/tmp/dorm/proxies")
        .build()
}

/// Listener recording the events it receives
#[derive(Default)]
pub struct Recorder {
    received: Mutex<Vec<EventArgs>>,
}

impl Recorder {
    pub fn seen(&self) -> Vec<String> {
        self.received().into_iter().map(|args| args.event).collect()
    }

    pub fn received(&self) -> Vec<EventArgs> {
        self.received.lock().unwrap().clone()
    }
}

impl EventListener for Recorder {
    fn handle(&self, args: &EventArgs) -> Result<()> {
        self.received.lock().unwrap().push(args.clone());
        Ok(())
    }
}
