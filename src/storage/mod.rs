//! Persistence layer for todoql.
//!
//! Resolvers never touch a database directly; they go through the
//! [`TodoStore`] trait, which offers the find-unique / find-many / create /
//! update / delete operations the API needs.
//!
//! ## Components
//!
//! - [`TodoStore`]: the persistence contract
//! - [`TodoFilter`]: equality and range filters for `find_todos`
//! - [`SqliteStore`]: SQLite-backed store (file or in-memory)
//! - [`MemoryStore`]: process-local store, handy for tests and throwaway runs

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{NewTodo, Something, Todo, TodoChanges};

/// Storage operations backing the GraphQL resolvers.
///
/// Implementations own id generation. `update_todo` and `delete_todo`
/// return [`crate::error::TodoqlError::NotFound`] when the id is unknown.
pub trait TodoStore: Send + Sync {
    fn find_todo(&self, id: &str) -> Result<Option<Todo>>;

    /// Todos matching `filter`, oldest first.
    fn find_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>>;

    fn create_todo(&self, new: NewTodo) -> Result<Todo>;

    fn update_todo(&self, id: &str, changes: TodoChanges) -> Result<Todo>;

    /// Removes the row and hands back what was stored.
    fn delete_todo(&self, id: &str) -> Result<Todo>;

    fn create_something(&self, name: String) -> Result<Something>;
}

/// Filter for [`TodoStore::find_todos`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    /// Due strictly before this instant. Todos without a due date never match.
    pub due_before: Option<DateTime<Utc>>,
}

impl TodoFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Open todos whose due date has passed at `now`.
    pub fn overdue_at(now: DateTime<Utc>) -> Self {
        Self {
            completed: Some(false),
            due_before: Some(now),
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(completed) = self.completed
            && todo.completed != completed
        {
            return false;
        }
        if let Some(cutoff) = self.due_before {
            return todo.due_date.is_some_and(|due| due < cutoff);
        }
        true
    }
}

/// Generates a new record id.
pub(crate) fn generate_id() -> String {
    nanoid::nanoid!()
}
