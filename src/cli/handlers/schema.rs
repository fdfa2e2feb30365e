use std::sync::Arc;

use anyhow::Result;

use crate::graphql::build_schema;
use crate::storage::MemoryStore;

/// Prints the SDL. No database is opened; the schema shape does not depend on data.
pub fn handle_schema() -> Result<()> {
    let schema = build_schema(Arc::new(MemoryStore::new()));
    println!("{}", schema.sdl());
    Ok(())
}
