//! Record types - the rows fed to the loader
//!
//! Two input shapes are accepted:
//! - `Record`: typed, every column required by construction
//! - `FieldMap`: field-name to value mapping, checked when the row is bound
//!
//! Both reach the insert statement through [`IntoRow`].

use crate::{Error, Result};
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::collections::BTreeMap;

/// A single SQL value bound to one column
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b.as_slice()),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

/// Conversion of an input item into the four bound column values.
///
/// `index` is the item's position in the input sequence and is only used
/// for error reporting.
pub trait IntoRow {
    fn into_row(self, index: usize) -> Result<[Value; 4]>;
}

/// One row of `sample_table1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Primary key
    pub pid: i64,
    pub price: f64,
    pub name: String,
    /// Raw payload, stored as a BLOB
    pub data: Vec<u8>,
}

impl Record {
    pub fn new(pid: i64, price: f64, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            pid,
            price,
            name: name.into(),
            data: data.into(),
        }
    }

    /// The two illustrative rows shipped with the tool
    pub fn samples() -> Vec<Record> {
        vec![
            Record::new(42, 42.195, "run", b"helo".to_vec()),
            Record::new(634, 3.776, "fuji", b"mount".to_vec()),
        ]
    }
}

impl IntoRow for Record {
    fn into_row(self, _index: usize) -> Result<[Value; 4]> {
        Ok([
            Value::Integer(self.pid),
            Value::Real(self.price),
            Value::Text(self.name),
            Value::Blob(self.data),
        ])
    }
}

impl IntoRow for &Record {
    fn into_row(self, index: usize) -> Result<[Value; 4]> {
        self.clone().into_row(index)
    }
}

/// A record as a field-name to value mapping.
///
/// Unknown fields are ignored. A missing column is a `MalformedRecord`
/// error and a value of the wrong kind for its column is an `Input` error.
/// An explicit `Value::Null` is bound as-is and left to the table's
/// constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, Value>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Record> for FieldMap {
    fn from(record: Record) -> Self {
        FieldMap::new()
            .with_value("pid", record.pid)
            .with_value("price", record.price)
            .with_value("name", record.name)
            .with_value("data", record.data)
    }
}

impl IntoRow for FieldMap {
    fn into_row(mut self, index: usize) -> Result<[Value; 4]> {
        let mut take = |field: &'static str| -> Result<Value> {
            let value = self
                .fields
                .remove(field)
                .ok_or(Error::MalformedRecord { index, field })?;
            if !fits_column(field, &value) {
                return Err(Error::Input(format!(
                    "record #{}: `{}` cannot hold {}",
                    index,
                    field,
                    value.kind()
                )));
            }
            Ok(value)
        };
        Ok([take("pid")?, take("price")?, take("name")?, take("data")?])
    }
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "an integer",
            Value::Real(_) => "a real",
            Value::Text(_) => "text",
            Value::Blob(_) => "a blob",
        }
    }
}

/// Kinds each column reads back as; nulls are left to the NOT NULL constraints
fn fits_column(field: &str, value: &Value) -> bool {
    matches!(
        (field, value),
        (_, Value::Null)
            | ("pid", Value::Integer(_))
            | ("price", Value::Integer(_) | Value::Real(_))
            | ("name", Value::Text(_))
            | ("data", Value::Blob(_))
    )
}
