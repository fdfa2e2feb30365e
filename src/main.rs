use anyhow::Result;
use clap::Parser;

use todoql::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_schema, handle_serve,
};
use todoql::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    todoql::logging::init(cli.verbose, cli.log_file.clone());

    let load_context = || CommandContext::load(cli.config.as_deref(), cli.database.as_deref());

    match cli.command {
        Commands::Init { ref db_path } => handle_init(db_path.clone()),
        Commands::Schema => handle_schema(),
        Commands::Serve { port, ref host } => handle_serve(load_context()?, port, host.clone()),
        Commands::Query {
            ref query,
            ref variables,
        } => handle_query(load_context()?, query.clone(), variables.clone()),
        Commands::Mutate {
            ref mutation,
            ref variables,
        } => handle_mutate(load_context()?, mutation.clone(), variables.clone()),
    }
}
