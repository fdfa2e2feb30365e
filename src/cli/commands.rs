use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "todoql")]
#[command(author, version, about = "A small GraphQL API for todos, backed by SQLite")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .todoql.yml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path, or ':memory:' (overrides config)
    #[arg(long, global = true, env = "TODOQL_DATABASE")]
    pub database: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .todoql.yml in the current directory
    Init {
        /// Database path to record in the config
        #[arg(long, default_value = "todoql.db")]
        db_path: String,
    },

    /// Start the GraphQL server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long, env = "TODOQL_PORT")]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Execute a GraphQL query
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation
    Mutate {
        /// Mutation selection, or a full `mutation(...) { ... }` operation
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Print the GraphQL schema (SDL)
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todoql",
            "query",
            "{ hello }",
            "--database",
            ":memory:",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.database.as_deref(), Some(":memory:"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Query { .. }));
    }
}
