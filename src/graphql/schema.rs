use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};

use crate::clock::{Clock, SystemClock};
use crate::error::TodoqlError;
use crate::model::{NewTodo, TodoChanges};
use crate::storage::{TodoFilter, TodoStore};
use crate::validation;

use super::types::*;

pub type TodoqlSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Shared handle to the persistence collaborator, stored in schema data.
pub type SharedStore = Arc<dyn TodoStore>;

/// Shared time source, stored in schema data.
pub type SharedClock = Arc<dyn Clock>;

pub fn build_schema(store: SharedStore) -> TodoqlSchema {
    build_schema_with_clock(store, Arc::new(SystemClock))
}

pub fn build_schema_with_clock(store: SharedStore, clock: SharedClock) -> TodoqlSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(Tracing)
        .data(store)
        .data(clock)
        .finish()
}

fn get_store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SharedStore> {
    ctx.data::<SharedStore>()
}

fn now(ctx: &Context<'_>) -> async_graphql::Result<chrono::DateTime<chrono::Utc>> {
    Ok(ctx.data::<SharedClock>()?.now())
}

/// Converts a domain error into a GraphQL error carrying `extensions.code`.
fn gql_error(e: TodoqlError) -> async_graphql::Error {
    if let TodoqlError::Validation(ref reason) = e {
        tracing::warn!(%reason, "Rejected input");
    }
    e.extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn hello(&self) -> Option<String> {
        Some("world".to_string())
    }

    /// All todos, oldest first
    async fn get_all_todos(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Todo>> {
        let store = get_store(ctx)?;
        let todos = store.find_todos(&TodoFilter::all()).map_err(gql_error)?;
        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// Todos whose completed flag equals the given value
    async fn get_all_complete(
        &self,
        ctx: &Context<'_>,
        input: GetCompleteTodoInput,
    ) -> async_graphql::Result<Vec<Todo>> {
        let store = get_store(ctx)?;
        let todos = store
            .find_todos(&TodoFilter::completed(input.completed))
            .map_err(gql_error)?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// A single todo by ID
    async fn get_todo(&self, ctx: &Context<'_>, input: GetTodoInput) -> async_graphql::Result<Todo> {
        let store = get_store(ctx)?;
        let todo = store
            .find_todo(&input.id)
            .map_err(gql_error)?
            .ok_or_else(|| gql_error(TodoqlError::NotFound(input.id.to_string())))?;
        Ok(todo.into())
    }

    /// Open todos whose due date has passed
    async fn get_all_overdue(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Todo>> {
        let store = get_store(ctx)?;
        let todos = store
            .find_todos(&TodoFilter::overdue_at(now(ctx)?))
            .map_err(gql_error)?;
        tracing::debug!(count = todos.len(), "Listed overdue todos");
        Ok(todos.into_iter().map(Todo::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_something(
        &self,
        ctx: &Context<'_>,
        input: CreateSomethingInput,
    ) -> async_graphql::Result<Something> {
        let store = get_store(ctx)?;
        let something = store.create_something(input.name).map_err(gql_error)?;
        tracing::info!(id = %something.id, name = %something.name, "Created something");
        Ok(something.into())
    }

    /// Create a todo. `dueDate` must be `DD-MM-YYYY` when given.
    async fn create_todo(
        &self,
        ctx: &Context<'_>,
        input: CreateTodoInput,
    ) -> async_graphql::Result<Todo> {
        let store = get_store(ctx)?;

        validation::validate_title(&input.title).map_err(gql_error)?;
        let due_date = input
            .due_date
            .as_deref()
            .map(validation::parse_date_input)
            .transpose()
            .map_err(gql_error)?;

        let new = NewTodo::new(input.title, now(ctx)?).with_due_date(due_date);
        let todo = store.create_todo(new).map_err(gql_error)?;
        tracing::info!(id = %todo.id, title = %todo.title, "Created todo");
        Ok(todo.into())
    }

    /// Flip the completed flag of a todo
    async fn toggle_todo(
        &self,
        ctx: &Context<'_>,
        input: ToggleTodoInput,
    ) -> async_graphql::Result<Todo> {
        let store = get_store(ctx)?;

        // Read-then-write; not atomic against concurrent togglers.
        let current = store
            .find_todo(&input.id)
            .map_err(gql_error)?
            .ok_or_else(|| gql_error(TodoqlError::NotFound(input.id.to_string())))?;

        let changes = TodoChanges::touch(current.next_updated_at(now(ctx)?))
            .with_completed(!current.completed);
        let todo = store.update_todo(&current.id, changes).map_err(gql_error)?;
        tracing::info!(id = %todo.id, completed = todo.completed, "Toggled todo");
        Ok(todo.into())
    }

    async fn update_todo_title(
        &self,
        ctx: &Context<'_>,
        input: UpdateTitleInput,
    ) -> async_graphql::Result<Todo> {
        let store = get_store(ctx)?;

        let current = store
            .find_todo(&input.id)
            .map_err(gql_error)?
            .ok_or_else(|| gql_error(TodoqlError::NotFound(input.id.to_string())))?;
        validation::validate_title(&input.title).map_err(gql_error)?;

        let changes = TodoChanges::touch(current.next_updated_at(now(ctx)?)).with_title(input.title);
        let todo = store.update_todo(&current.id, changes).map_err(gql_error)?;
        tracing::info!(id = %todo.id, title = %todo.title, "Renamed todo");
        Ok(todo.into())
    }

    /// Delete a todo, returning a confirmation message
    async fn delete_todo(
        &self,
        ctx: &Context<'_>,
        input: DeleteTodoInput,
    ) -> async_graphql::Result<String> {
        let store = get_store(ctx)?;

        let current = store
            .find_todo(&input.id)
            .map_err(gql_error)?
            .ok_or_else(|| gql_error(TodoqlError::NotFound(input.id.to_string())))?;

        let deleted = store.delete_todo(&current.id).map_err(gql_error)?;
        tracing::info!(id = %deleted.id, title = %deleted.title, "Deleted todo");
        Ok(format!("Todo \"{}\" deleted", deleted.title))
    }
}
