//! dorm - Entry Point
//!
//! Loads the configuration, wires every connection, entity manager and
//! migration configuration, then runs one console command against them.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `info` | Connections, entity managers and migration configurations |
//! | `doctrine:dbal:run-sql` | Execute one statement on a connection |
//! | `doctrine:database:create` | Create the database of a connection |
//! | `doctrine:database:drop` | Drop the database of a connection |
//! | `doctrine:orm:info` | Mapped classes of an entity manager |
//! | `doctrine:orm:clear-cache:metadata` | Clear the metadata cache |
//! | `doctrine:orm:clear-cache:query` | Clear the query cache |
//! | `doctrine:orm:clear-cache:result` | Clear the result cache |
//! | `doctrine:migrations:check` | Resolve a migration configuration and its target |

// Force-link dorm-providers so linkme registrations are included
extern crate dorm_providers;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dorm::infrastructure::config::ConfigLoader;
use dorm::infrastructure::dbal::{DatabaseOutcome, create_database, drop_database};
use dorm::infrastructure::logging::init_logging;
use dorm::infrastructure::orm::EntityManager;
use dorm::{AppContext, init_app};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Exit code of `doctrine:database:drop` run without `--force`
const EXIT_NO_FORCE: u8 = 2;

/// Command line interface for dorm
#[derive(Parser, Debug)]
#[command(name = "dorm")]
#[command(about = "Doctrine-style connections, entity managers and migrations")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the wired connections, entity managers and migration configurations
    Info,

    /// Execute a SQL statement on a connection
    #[command(name = "doctrine:dbal:run-sql")]
    RunSql {
        /// Statement to execute
        sql: String,
        /// Connection name, the default connection when omitted
        #[arg(long)]
        connection: Option<String>,
    },

    /// Create the database of a connection
    #[command(name = "doctrine:database:create")]
    DatabaseCreate {
        /// Connection name, the default connection when omitted
        #[arg(long)]
        connection: Option<String>,
        /// Skip an existing database instead of failing
        #[arg(long)]
        if_not_exists: bool,
    },

    /// Drop the database of a connection
    #[command(name = "doctrine:database:drop")]
    DatabaseDrop {
        /// Connection name, the default connection when omitted
        #[arg(long)]
        connection: Option<String>,
        /// Skip a missing database instead of failing
        #[arg(long)]
        if_exists: bool,
        /// Actually drop the database
        #[arg(short, long)]
        force: bool,
    },

    /// List the mapped classes of an entity manager
    #[command(name = "doctrine:orm:info")]
    OrmInfo {
        /// Entity manager name, the default manager when omitted
        #[arg(long)]
        em: Option<String>,
    },

    /// Clear the metadata cache of an entity manager
    #[command(name = "doctrine:orm:clear-cache:metadata")]
    ClearMetadataCache {
        #[arg(long)]
        em: Option<String>,
    },

    /// Clear the query cache of an entity manager
    #[command(name = "doctrine:orm:clear-cache:query")]
    ClearQueryCache {
        #[arg(long)]
        em: Option<String>,
    },

    /// Clear the result cache of an entity manager
    #[command(name = "doctrine:orm:clear-cache:result")]
    ClearResultCache {
        #[arg(long)]
        em: Option<String>,
    },

    /// Resolve a migration configuration and show where it points
    #[command(name = "doctrine:migrations:check")]
    MigrationsCheck {
        /// Migration configuration name, "default" when omitted
        #[arg(long)]
        configuration: Option<String>,
        /// Migrations namespace, the first one when omitted
        #[arg(long)]
        namespace: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(config.logging.clone()).context("Failed to initialize logging")?;

    let ctx = init_app(config).context("Failed to wire the application")?;
    run(&ctx, cli.command)
}

fn run(ctx: &AppContext, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Info => print_json(&info_report(ctx))?,
        Command::RunSql { sql, connection } => {
            let connection = ctx.manager().get_connection(connection.as_deref())?;
            let affected = connection.execute_statement(&sql)?;
            info!(connection = connection.name(), affected, "Statement executed");
            println!("{affected} row(s) affected");
        }
        Command::DatabaseCreate {
            connection,
            if_not_exists,
        } => database_create(ctx, connection.as_deref(), if_not_exists)?,
        Command::DatabaseDrop {
            connection,
            if_exists,
            force,
        } => {
            if !force {
                return database_drop_refused(ctx, connection.as_deref());
            }
            database_drop(ctx, connection.as_deref(), if_exists)?;
        }
        Command::OrmInfo { em } => {
            let em = ctx.manager().get_manager(em.as_deref())?;
            let classes = em.metadata_factory().all_metadata()?;
            if classes.is_empty() {
                println!("No mapped entities in entity manager \"{}\"", em.name());
            }
            for metadata in classes {
                println!("[OK] {} ({})", metadata.class, metadata.table);
            }
        }
        Command::ClearMetadataCache { em } => {
            clear_cache(ctx, em.as_deref(), "metadata", |em| {
                em.configuration().metadata_cache()
            })?;
        }
        Command::ClearQueryCache { em } => {
            clear_cache(ctx, em.as_deref(), "query", |em| em.configuration().query_cache())?;
        }
        Command::ClearResultCache { em } => {
            clear_cache(ctx, em.as_deref(), "result", |em| em.configuration().result_cache())?;
        }
        Command::MigrationsCheck {
            configuration,
            namespace,
        } => {
            let dependencies = ctx.migration_dependencies(configuration.as_deref())?;
            let (namespace, dir) = dependencies.migrations_directory(namespace.as_deref())?;
            print_json(&json!({
                "configuration": dependencies.configuration().name(),
                "connection": dependencies.connection().name(),
                "entity_manager": dependencies.entity_manager().map(|em| em.name().to_string()),
                "namespace": namespace,
                "directory": dir,
                "table": dependencies.configuration().table_storage().table_name,
            }))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn database_create(
    ctx: &AppContext,
    connection: Option<&str>,
    if_not_exists: bool,
) -> anyhow::Result<()> {
    let connection = ctx.manager().get_connection(connection)?;
    let change = create_database(&connection, if_not_exists).with_context(|| {
        format!(
            "Could not create database for connection named {}",
            connection.name()
        )
    })?;
    if change.outcome == DatabaseOutcome::Skipped {
        println!(
            "Database {} for connection named {} already exists. Skipped.",
            change.database,
            connection.name()
        );
    } else {
        println!(
            "Created database {} for connection named {}",
            change.database,
            connection.name()
        );
    }
    Ok(())
}

fn database_drop(ctx: &AppContext, connection: Option<&str>, if_exists: bool) -> anyhow::Result<()> {
    let connection = ctx.manager().get_connection(connection)?;
    let change = drop_database(&connection, if_exists).with_context(|| {
        format!(
            "Could not drop database for connection named {}",
            connection.name()
        )
    })?;
    if change.outcome == DatabaseOutcome::Skipped {
        println!(
            "Database {} for connection named {} doesn't exist. Skipped.",
            change.database,
            connection.name()
        );
    } else {
        println!(
            "Dropped database {} for connection named {}",
            change.database,
            connection.name()
        );
    }
    Ok(())
}

fn database_drop_refused(ctx: &AppContext, connection: Option<&str>) -> anyhow::Result<ExitCode> {
    let connection = ctx.manager().get_connection(connection)?;
    warn!(connection = connection.name(), "Database drop needs --force");
    println!("ATTENTION: This operation should not be executed in a production environment.");
    println!();
    println!(
        "Would drop the database for connection named {}.",
        connection.name()
    );
    println!("Please run the operation with --force to execute");
    println!("All data will be lost!");
    Ok(ExitCode::from(EXIT_NO_FORCE))
}

fn clear_cache(
    ctx: &AppContext,
    em: Option<&str>,
    kind: &str,
    cache: impl Fn(&EntityManager) -> std::sync::Arc<dyn dorm::domain::ports::cache::CacheProvider>,
) -> anyhow::Result<()> {
    let em = ctx.manager().get_manager(em)?;
    let provider = cache(em.as_ref());
    provider
        .clear()
        .with_context(|| format!("Failed to clear the {kind} cache"))?;
    println!(
        "Cleared the {kind} cache of entity manager \"{}\" ({})",
        em.name(),
        provider.provider_name()
    );
    Ok(())
}

fn info_report(ctx: &AppContext) -> serde_json::Value {
    let manager = ctx.manager();
    let connections: Vec<_> = manager
        .connections()
        .into_iter()
        .map(|(name, connection)| {
            json!({
                "name": name,
                "driver": connection.driver().name(),
                "platform": connection.database_platform().name(),
            })
        })
        .collect();
    let managers: Vec<_> = manager
        .managers()
        .into_iter()
        .map(|(name, em)| json!({"name": name, "connection": em.connection().name()}))
        .collect();

    json!({
        "default_connection": manager.default_connection_name(),
        "default_entity_manager": manager.default_manager_name(),
        "connections": connections,
        "entity_managers": managers,
        "migrations": ctx.migrations().names(),
    })
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
