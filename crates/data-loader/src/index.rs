//! Catalog building from raw JSON user records.
//!
//! Each record is coerced on its own, so one malformed entry degrades to
//! defaults instead of failing the whole load:
//! - `user_id`: integers as-is, floats truncated toward zero, anything else `0`
//! - `username`: strings as-is, anything else `"Inconnu"`
//! - `notes`: object keys (document order) or string entries of an array
//!   become rated titles; rating values are ignored

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde_json::Value;
use tracing::{debug, warn};

impl Catalog {
    /// Build an unbounded catalog from raw records
    pub fn load(records: &[Value]) -> Self {
        Self::load_with_limits(records, CatalogLimits::unbounded())
    }

    /// Build a catalog from raw records, enforcing `limits`.
    ///
    /// Records past `max_users` are dropped, as are titles past
    /// `max_titles_per_user`. Both are counted in the catalog's `LoadReport`.
    pub fn load_with_limits(records: &[Value], limits: CatalogLimits) -> Self {
        let keep = limits
            .max_users
            .map_or(records.len(), |max| records.len().min(max));

        let mut report = LoadReport {
            records_seen: records.len(),
            users_dropped: records.len() - keep,
            titles_dropped: 0,
        };

        let users: Vec<User> = records[..keep]
            .iter()
            .map(|record| {
                let (user, dropped) = user_from_record(record, limits.max_titles_per_user);
                report.titles_dropped += dropped;
                user
            })
            .collect();

        if report.is_truncated() {
            warn!(
                "Catalog truncated: kept {} of {} users, dropped {} rated titles",
                users.len(),
                report.records_seen,
                report.titles_dropped
            );
        }
        debug!("Built catalog with {} users", users.len());

        Self { users, report }
    }

    /// Build a catalog from an already parsed JSON document.
    ///
    /// Fails only when the document root is not an array.
    pub fn from_json_value(value: &Value, file: &str, limits: CatalogLimits) -> Result<Self> {
        match value {
            Value::Array(records) => Ok(Self::load_with_limits(records, limits)),
            other => Err(DataLoadError::NotACollection {
                file: file.to_string(),
                found: json_kind(other).to_string(),
            }),
        }
    }
}

/// Coerce one raw record into a `User`, returning how many titles were cut
fn user_from_record(record: &Value, max_titles: Option<usize>) -> (User, usize) {
    let user_id = record.get("user_id").map_or(0, coerce_user_id);

    let username = record
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_USERNAME);

    let mut user = User::new(user_id, username);
    let mut dropped = 0;

    for title in titles_of(record.get("notes")) {
        if user.rated_titles.contains(title) {
            continue;
        }
        if max_titles.is_some_and(|max| user.rated_titles.len() >= max) {
            dropped += 1;
            continue;
        }
        user.rated_titles.insert(title);
    }

    (user, dropped)
}

fn coerce_user_id(value: &Value) -> UserId {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as UserId))
        .unwrap_or(0)
}

/// Titles carried by a `notes` value, in document order
fn titles_of(notes: Option<&Value>) -> Vec<&str> {
    match notes {
        Some(Value::Object(map)) => map.keys().map(String::as_str).collect(),
        Some(Value::Array(entries)) => entries.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
