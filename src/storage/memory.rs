use std::sync::{Mutex, MutexGuard};

use super::{TodoFilter, TodoStore, generate_id};
use crate::error::{Result, TodoqlError};
use crate::model::{NewTodo, Something, Todo, TodoChanges};

#[derive(Default)]
struct Tables {
    todos: Vec<Todo>,
    somethings: Vec<Something>,
}

/// In-process store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| TodoqlError::Storage("memory store lock poisoned".to_string()))
    }
}

impl TodoStore for MemoryStore {
    fn find_todo(&self, id: &str) -> Result<Option<Todo>> {
        let tables = self.tables()?;
        Ok(tables.todos.iter().find(|t| t.id == id).cloned())
    }

    fn find_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let tables = self.tables()?;
        let mut todos: Vec<Todo> = tables
            .todos
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(todos)
    }

    fn create_todo(&self, new: NewTodo) -> Result<Todo> {
        let todo = Todo::from_new(generate_id(), new);
        tracing::debug!(id = %todo.id, "Inserting todo");
        self.tables()?.todos.push(todo.clone());
        Ok(todo)
    }

    fn update_todo(&self, id: &str, changes: TodoChanges) -> Result<Todo> {
        let mut tables = self.tables()?;
        let todo = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoqlError::NotFound(id.to_string()))?;
        todo.apply(changes);
        Ok(todo.clone())
    }

    fn delete_todo(&self, id: &str) -> Result<Todo> {
        let mut tables = self.tables()?;
        let pos = tables
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoqlError::NotFound(id.to_string()))?;
        Ok(tables.todos.remove(pos))
    }

    fn create_something(&self, name: String) -> Result<Something> {
        let something = Something::new(generate_id(), name);
        self.tables()?.somethings.push(something.clone());
        Ok(something)
    }
}
