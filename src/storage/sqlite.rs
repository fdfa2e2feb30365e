use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use super::migrations::apply_migrations;
use super::{TodoFilter, TodoStore, generate_id};
use crate::error::{Result, TodoqlError};
use crate::model::{NewTodo, Something, Todo, TodoChanges};

const TODO_SELECT_SQL: &str = "SELECT id, title, completed, created_at, updated_at, due_date FROM todos";

/// SQLite-backed store. A single connection is shared behind a mutex, so
/// statements from concurrent requests run one at a time.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Opening database");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        Self::bootstrap(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        tracing::info!("Opening in-memory database");
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(mut conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TodoqlError::Storage("database connection lock poisoned".to_string()))
    }

    fn select_by_id(conn: &Connection, id: &str) -> Result<Option<Todo>> {
        let todo = conn
            .query_row(
                &format!("{TODO_SELECT_SQL} WHERE id = ?1"),
                params![id],
                parse_todo_row,
            )
            .optional()?;
        Ok(todo)
    }
}

impl TodoStore for SqliteStore {
    fn find_todo(&self, id: &str) -> Result<Option<Todo>> {
        let conn = self.conn()?;
        Self::select_by_id(&conn, id)
    }

    fn find_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = filter.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(i64::from(completed)));
        }
        if let Some(cutoff) = filter.due_before {
            sql.push_str(" AND due_date IS NOT NULL AND due_date < ?");
            bind_values.push(Value::Text(encode_timestamp(&cutoff)));
        }
        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let todos = stmt
            .query_map(params_from_iter(bind_values), parse_todo_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    fn create_todo(&self, new: NewTodo) -> Result<Todo> {
        let todo = Todo::from_new(generate_id(), new);
        tracing::debug!(id = %todo.id, "Inserting todo");

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO todos (id, title, completed, created_at, updated_at, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                todo.id,
                todo.title,
                todo.completed,
                encode_timestamp(&todo.created_at),
                encode_timestamp(&todo.updated_at),
                todo.due_date.as_ref().map(encode_timestamp),
            ],
        )?;
        Ok(todo)
    }

    fn update_todo(&self, id: &str, changes: TodoChanges) -> Result<Todo> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE todos
             SET title = COALESCE(?1, title),
                 completed = COALESCE(?2, completed),
                 updated_at = ?3
             WHERE id = ?4",
            params![
                changes.title,
                changes.completed,
                encode_timestamp(&changes.updated_at),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(TodoqlError::NotFound(id.to_string()));
        }

        Self::select_by_id(&conn, id)?.ok_or_else(|| TodoqlError::NotFound(id.to_string()))
    }

    fn delete_todo(&self, id: &str) -> Result<Todo> {
        let conn = self.conn()?;
        let todo =
            Self::select_by_id(&conn, id)?.ok_or_else(|| TodoqlError::NotFound(id.to_string()))?;
        conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(todo)
    }

    fn create_something(&self, name: String) -> Result<Something> {
        let something = Something::new(generate_id(), name);
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO somethings (id, name) VALUES (?1, ?2)",
            params![something.id, something.name],
        )?;
        Ok(something)
    }
}

/// Fixed-width UTC text, so lexical order in SQL equals time order.
fn encode_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_todo_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;
    let due_date: Option<String> = row.get(5)?;

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        created_at: decode_timestamp(3, &created_at)?,
        updated_at: decode_timestamp(4, &updated_at)?,
        due_date: due_date
            .as_deref()
            .map(|raw| decode_timestamp(5, raw))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_round_trips_all_columns() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store
            .create_todo(NewTodo::new("Ship it".to_string(), at(1)).with_due_date(Some(at(9))))
            .unwrap();

        let loaded = store.find_todo(&created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_filters() {
        let store = SqliteStore::open_in_memory().unwrap();
        let overdue = store
            .create_todo(NewTodo::new("late".to_string(), at(1)).with_due_date(Some(at(2))))
            .unwrap();
        let future = store
            .create_todo(NewTodo::new("later".to_string(), at(2)).with_due_date(Some(at(20))))
            .unwrap();
        let done = store
            .create_todo(NewTodo::new("done".to_string(), at(3)).with_due_date(Some(at(2))))
            .unwrap();
        store
            .update_todo(&done.id, TodoChanges::touch(at(4)).with_completed(true))
            .unwrap();

        let ids = |filter: TodoFilter| -> Vec<String> {
            store
                .find_todos(&filter)
                .unwrap()
                .into_iter()
                .map(|t| t.id)
                .collect()
        };

        assert_eq!(ids(TodoFilter::all()).len(), 3);
        assert_eq!(ids(TodoFilter::completed(true)), vec![done.id.clone()]);
        assert_eq!(
            ids(TodoFilter::completed(false)),
            vec![overdue.id.clone(), future.id.clone()]
        );
        assert_eq!(ids(TodoFilter::overdue_at(at(10))), vec![overdue.id]);
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let todo = store
            .create_todo(NewTodo::new("old".to_string(), at(1)))
            .unwrap();

        let updated = store
            .update_todo(&todo.id, TodoChanges::touch(at(2)).with_title("new".to_string()))
            .unwrap();
        assert_eq!(updated.title, "new");
        assert!(!updated.completed);
        assert_eq!(updated.created_at, at(1));
        assert_eq!(updated.updated_at, at(2));
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            store.update_todo("ghost", TodoChanges::touch(at(1))),
            Err(TodoqlError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_todo("ghost"),
            Err(TodoqlError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_returns_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let todo = store
            .create_todo(NewTodo::new("bye".to_string(), at(1)))
            .unwrap();
        let deleted = store.delete_todo(&todo.id).unwrap();
        assert_eq!(deleted.title, "bye");
        assert_eq!(store.find_todo(&todo.id).unwrap(), None);
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("todoql.db");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store
                .create_todo(NewTodo::new("durable".to_string(), at(1)))
                .unwrap()
                .id
        };

        let reopened = SqliteStore::open(&path).unwrap();
        let todo = reopened.find_todo(&id).unwrap().unwrap();
        assert_eq!(todo.title, "durable");
    }

    #[test]
    fn test_create_something() {
        let store = SqliteStore::open_in_memory().unwrap();
        let something = store.create_something("gizmo".to_string()).unwrap();
        let conn = store.conn().unwrap();
        let name: String = conn
            .query_row(
                "SELECT name FROM somethings WHERE id = ?1",
                params![something.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "gizmo");
    }
}
