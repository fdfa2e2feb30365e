use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Renders a timestamp the way it goes over the wire: RFC 3339 in UTC with
/// millisecond precision and a `Z` suffix.
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Todo {
    /// Materializes a freshly created row. The id comes from the store.
    pub fn from_new(id: String, new: NewTodo) -> Self {
        Self {
            id,
            title: new.title,
            completed: false,
            created_at: new.created_at,
            updated_at: new.created_at,
            due_date: new.due_date,
        }
    }

    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = changes.updated_at;
    }

    /// Timestamp for the next write: `now`, but always at least one wire tick
    /// (1ms) past the current `updated_at` so successive updates stay ordered.
    pub fn next_updated_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.updated_at + Duration::milliseconds(1))
    }
}

/// Insert payload for a todo.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            title,
            due_date: None,
            created_at: now,
        }
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Partial update for a todo. `updated_at` is always written.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl TodoChanges {
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            title: None,
            completed: None,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}
