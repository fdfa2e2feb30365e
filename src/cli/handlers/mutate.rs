use anyhow::Result;

use super::{CommandContext, execute_and_print, parse_variables};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    let schema = ctx.schema();

    let request =
        async_graphql::Request::new(mutation_document(&mutation)).variables(parse_variables(variables)?);

    if !execute_and_print(&schema, request)? {
        anyhow::bail!("GraphQL mutation returned errors");
    }
    Ok(())
}

/// Bare selections are wrapped in `mutation { }`; full operations (which may
/// declare variables) pass through untouched.
fn mutation_document(input: &str) -> String {
    if input.trim_start().starts_with("mutation") {
        input.to_string()
    } else {
        format!("mutation {{ {} }}", input)
    }
}
