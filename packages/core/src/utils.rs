// ABOUTME: Shared utility functions for Mindgate
// ABOUTME: Identifier normalization, SQL literal rendering and timestamp parsing

use chrono::{DateTime, NaiveDateTime, Utc};

/// Derive a resource identifier from a human-provided name.
///
/// The name is trimmed and lowercased, and every run of whitespace and/or
/// hyphens becomes a single underscore. Names that differ only by case or
/// separators map to the same identifier.
pub fn normalize_identifier(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.trim().chars() {
        if c.is_whitespace() || c == '-' {
            in_separator = true;
            continue;
        }
        if in_separator {
            id.push('_');
            in_separator = false;
        }
        id.extend(c.to_lowercase());
    }

    id
}

/// Escape a value for use inside a single-quoted SQL string
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a value as a single-quoted SQL string literal
pub fn sql_string(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}

/// Quote an object name with backticks so any character may appear in it
pub fn sql_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a structured value (list or map) as a quoted JSON text literal
pub fn sql_json(value: &serde_json::Value) -> String {
    sql_string(&value.to_string())
}

/// Parse a timestamp as written by MindsDB or by Python's `isoformat()`.
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
