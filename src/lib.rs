//! # todoql - a small GraphQL API for todos
//!
//! todoql serves CRUD operations over `Todo` and `Something` records through
//! GraphQL, persisting them in SQLite.
//!
//! ## Features
//!
//! - **Todos**: create, toggle, rename, delete; optional `DD-MM-YYYY` due dates
//! - **Filtering**: completed / open todos and overdue todos
//! - **Transport**: HTTP server with GraphiQL, or one-shot CLI queries
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a .todoql.yml next to you
//! todoql init
//!
//! # Serve the API
//! todoql serve --port 4000
//!
//! # Or talk to the database directly
//! todoql mutate 'createTodo(input: { title: "Buy milk" }) { id }'
//! todoql query '{ getAllOverdue { title dueDate } }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers, and HTTP host
//! - [`model`]: Data models (`Todo`, `Something`)
//! - [`storage`]: Persistence contract and its SQLite / in-memory stores
//! - [`validation`]: Title and due date validation

/// Command-line interface using clap.
pub mod cli;

/// Time source used by resolvers.
pub mod clock;

/// Configuration loading and management.
///
/// Handles `.todoql.yml` configuration files and database location.
pub mod config;

/// Error types and result aliases.
///
/// Defines `TodoqlError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

pub mod logging;

/// Data models for todos.
pub mod model;

/// Persistence layer.
pub mod storage;

/// Input validation utilities.
pub mod validation;
