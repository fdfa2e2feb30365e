//! GraphQL schema, resolvers, and HTTP host for todoql.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server (GraphiQL on GET /)
//! todoql serve --port 4000
//!
//! # Execute a query from the CLI
//! todoql query '{ getAllTodos { id title completed dueDate } }'
//!
//! # Execute a mutation from the CLI
//! todoql mutate 'createTodo(input: { title: "Buy milk", dueDate: "31-12-2024" }) { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `hello`, `getAllTodos`, `getAllComplete`, `getTodo`, `getAllOverdue`
//! - **Mutations**: `createSomething`, `createTodo`, `toggleTodo`, `updateTodoTitle`, `deleteTodo`
//!
//! Domain failures carry `extensions.code`: `VALIDATION_ERROR` or `NOT_FOUND`.

mod schema;
mod server;
mod types;

pub use schema::{
    MutationRoot, QueryRoot, SharedClock, SharedStore, TodoqlSchema, build_schema,
    build_schema_with_clock,
};
pub use server::{router, run_server, serve};
pub use types::*;
