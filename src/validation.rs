//! Input validation for todo data.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::{Result, TodoqlError};

/// Accepted shape of a due date: `DD-MM-YYYY`.
static DATE_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("date pattern is valid"));

/// Validates a todo title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(TodoqlError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

/// Parses a `DD-MM-YYYY` due date into UTC midnight of that day.
pub fn parse_date_input(input: &str) -> Result<DateTime<Utc>> {
    if !DATE_INPUT.is_match(input) {
        return Err(TodoqlError::Validation(format!(
            "Invalid date '{}', expected DD-MM-YYYY",
            input
        )));
    }

    let date = NaiveDate::parse_from_str(input, "%d-%m-%Y").map_err(|_| {
        TodoqlError::Validation(format!("Invalid date '{}': no such day", input))
    })?;

    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}
