// ABOUTME: Tagged representation of MindsDB SQL API responses
// ABOUTME: Maps every known response shape explicitly and keeps unknown shapes for fallback routing

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};

/// Raw response body of `POST /api/sql/query`, discriminated by `type`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawResponse {
    Table {
        #[serde(default)]
        column_names: Vec<String>,
        #[serde(default)]
        data: Vec<Vec<Value>>,
    },
    Ok {
        #[serde(default)]
        affected_rows: Option<u64>,
    },
    Error {
        #[serde(default)]
        error_code: Option<i64>,
        #[serde(default)]
        error_message: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Outcome of a statement the platform accepted
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Table(Table),
    Ok { affected_rows: Option<u64> },
    /// A body that matches none of the known shapes
    Unrecognized(Value),
}

impl QueryResult {
    /// Classify a response body. Platform-reported errors become
    /// `GatewayError::Execution`.
    pub fn from_value(body: Value) -> GatewayResult<Self> {
        match serde_json::from_value::<RawResponse>(body.clone()) {
            Ok(RawResponse::Table { column_names, data }) => {
                Ok(QueryResult::Table(Table::new(column_names, data)))
            }
            Ok(RawResponse::Ok { affected_rows }) => Ok(QueryResult::Ok { affected_rows }),
            Ok(RawResponse::Error {
                error_code,
                error_message,
            }) => {
                let message = error_message.unwrap_or_else(|| "Unknown error".to_string());
                Err(GatewayError::Execution(match error_code {
                    Some(code) => format!("[{}] {}", code, message),
                    None => message,
                }))
            }
            Ok(RawResponse::Other) | Err(_) => Ok(QueryResult::Unrecognized(body)),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            QueryResult::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            QueryResult::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Tabular result set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, data: Vec<Vec<Value>>) -> Self {
        Self { columns, data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows keyed by lower-cased column name
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.data.iter().map(move |values| {
            let map = self
                .columns
                .iter()
                .map(|c| c.to_lowercase())
                .zip(values.iter().cloned())
                .collect();
            Row(map)
        })
    }

    /// Text of the first column of every row, skipping nulls
    pub fn first_column_values(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|values| values.first())
            .filter_map(value_text)
            .collect()
    }
}

/// One result row keyed by lower-cased column name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(&column.to_lowercase())
    }

    /// Column rendered as text; scalars are stringified, nulls are absent
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(value_text)
    }

    /// Column holding a JSON document, either inline or as JSON text
    pub fn json(&self, column: &str) -> Option<Value> {
        match self.get(column)? {
            Value::String(raw) => serde_json::from_str(raw).ok(),
            Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Row(map
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect())
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
