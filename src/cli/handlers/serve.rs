use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::graphql::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, port: Option<u16>, host: Option<String>) -> Result<()> {
    let port = port.unwrap_or(ctx.config.server.port);
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid host address '{}'", host))?;
    let addr = SocketAddr::new(ip, port);

    let schema = ctx.schema();

    println!(
        "{} GraphQL server on {}",
        "Starting".green(),
        format!("http://{}", addr).cyan()
    );
    println!("GraphiQL: {}", format!("http://{}", addr).cyan());

    tokio::runtime::Runtime::new()?.block_on(async { run_server(schema, addr).await })?;
    Ok(())
}
