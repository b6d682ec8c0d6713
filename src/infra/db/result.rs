//! Tabular results returned by [`super::Database::execute_query`].

use rusqlite::types::Value;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::sync::Arc;

/// Rows of a SELECT, with the column order of its select list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

/// One result row: a mapping from column name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl QueryResult {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self {
            columns: columns.into(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(Row {
            columns: self.columns.clone(),
            values,
        });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_text(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Column/value pairs in select-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

struct SqlValue<'a>(&'a Value);

impl Serialize for SqlValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_none(),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Real(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Blob(v) => serializer.serialize_bytes(v),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &SqlValue(value))?;
        }
        map.end()
    }
}

impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("QueryResult", 2)?;
        state.serialize_field("columns", &*self.columns)?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}
