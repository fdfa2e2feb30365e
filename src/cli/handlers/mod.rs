mod init;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::{DatabaseLocation, TodoqlConfig};
use crate::graphql::{SharedStore, TodoqlSchema, build_schema};
use crate::storage::SqliteStore;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Common context passed to command handlers that talk to the database
pub struct CommandContext {
    pub config: TodoqlConfig,
    pub store: SharedStore,
}

impl CommandContext {
    /// Resolves configuration and opens the store.
    ///
    /// `config_path` skips discovery; `database` overrides whatever the config says.
    pub fn load(config_path: Option<&Path>, database: Option<&str>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config, root) = match config_path {
            Some(path) => {
                let (config, root) = TodoqlConfig::load(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                (config, Some(root))
            }
            None => TodoqlConfig::discover(&cwd).context("Failed to load todoql configuration")?,
        };

        let location = match database {
            Some(raw) => DatabaseLocation::parse(raw, &cwd),
            None => config.database_location(root.as_deref())?,
        };

        Ok(Self {
            store: open_store(&location)?,
            config,
        })
    }

    pub fn schema(&self) -> TodoqlSchema {
        build_schema(self.store.clone())
    }
}

fn open_store(location: &DatabaseLocation) -> Result<SharedStore> {
    let store = match location {
        DatabaseLocation::Memory => SqliteStore::open_in_memory()?,
        DatabaseLocation::File(path) => SqliteStore::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?,
    };
    Ok(Arc::new(store))
}

/// Parses `--variables` JSON into GraphQL variables.
fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Invalid --variables JSON"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Runs one request and prints the JSON response. Returns whether it had no errors.
fn execute_and_print(schema: &TodoqlSchema, request: async_graphql::Request) -> Result<bool> {
    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));
    let ok = response.is_ok();
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(ok)
}
