use crate::model::{self, Something as ModelSomething, Todo as ModelTodo};
use async_graphql::{ID, InputObject, SimpleObject};

#[derive(SimpleObject, Clone)]
pub struct Todo {
    pub id: ID,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
    pub due_date: Option<String>,
}

impl From<ModelTodo> for Todo {
    fn from(t: ModelTodo) -> Self {
        Self {
            id: ID(t.id),
            title: t.title,
            completed: t.completed,
            created_at: model::to_iso_string(&t.created_at),
            updated_at: model::to_iso_string(&t.updated_at),
            due_date: t.due_date.as_ref().map(model::to_iso_string),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Something {
    pub id: ID,
    pub name: String,
}

impl From<ModelSomething> for Something {
    fn from(s: ModelSomething) -> Self {
        Self {
            id: ID(s.id),
            name: s.name,
        }
    }
}

#[derive(InputObject)]
pub struct CreateSomethingInput {
    pub name: String,
}

#[derive(InputObject)]
pub struct CreateTodoInput {
    pub title: String,
    /// Due date as `DD-MM-YYYY`
    pub due_date: Option<String>,
}

#[derive(InputObject)]
pub struct ToggleTodoInput {
    pub id: ID,
}

#[derive(InputObject)]
pub struct GetCompleteTodoInput {
    pub completed: bool,
}

#[derive(InputObject)]
pub struct GetTodoInput {
    pub id: ID,
}

#[derive(InputObject)]
pub struct DeleteTodoInput {
    pub id: ID,
}

#[derive(InputObject)]
pub struct UpdateTitleInput {
    pub id: ID,
    pub title: String,
}
