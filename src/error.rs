use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoqlError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TodoqlError {
    /// Machine-readable code attached to GraphQL errors under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            TodoqlError::Validation(_) => "VALIDATION_ERROR",
            TodoqlError::NotFound(_) => "NOT_FOUND",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for TodoqlError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.code().to_string()))
    }
}

pub type Result<T> = std::result::Result<T, TodoqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            TodoqlError::Validation("x".to_string()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(TodoqlError::NotFound("x".to_string()).code(), "NOT_FOUND");
        assert_eq!(
            TodoqlError::Storage("disk".to_string()).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_extend_keeps_message_and_code() {
        let err = TodoqlError::NotFound("abc".to_string()).extend();
        assert_eq!(err.message, "Todo not found: abc");
        let ext = err.extensions.expect("extensions set");
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND".to_string()))
        );
    }
}
