//! Data models for todoql.
//!
//! - [`Todo`]: a task with a completion flag and an optional due date
//! - [`Something`]: a named record, create-only
//! - [`NewTodo`] / [`TodoChanges`]: write payloads handed to the store

mod something;
mod todo;

pub use something::Something;
pub use todo::{NewTodo, Todo, TodoChanges, to_iso_string};
