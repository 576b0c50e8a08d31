//! Record access through the serialized field map.
//!
//! The table never knows the shape of a record. It serializes each record
//! once into a JSON object and reads cells from that map by field key.
//! The same serialization drives structural identity: two records whose
//! serialized content matches are the same row.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

static NULL: Value = Value::Null;

/// A row of table data.
///
/// Every `Serialize + Clone` type is a record. Fields are read from the
/// record's serialized object by key; a record that does not serialize to
/// an object simply has no fields.
pub trait Record: Serialize + Clone {}

impl<T: Serialize + Clone> Record for T {}

/// Serialized field map of a single record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// Serialize a record into its field map.
    pub fn of<R: Record>(record: &R) -> Result<Self> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }

    /// Like [`Fields::of`], but a record that fails to serialize yields an
    /// empty map so every cell renders empty.
    pub fn of_lossy<R: Record>(record: &R) -> Self {
        Self::of(record).unwrap_or_else(|e| {
            log::warn!("Record has no readable fields: {}", e);
            Self::default()
        })
    }

    /// Value of a field, `Null` when missing.
    pub fn get(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Text shown for a field value when the column has no custom renderer.
///
/// Missing and null values render empty, strings render unquoted, and
/// everything else uses its compact JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Identity of a row for selection membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(String);

impl RowKey {
    /// Create a key from an explicit identity string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key derived from the record's full serialized content.
    ///
    /// Object keys serialize in sorted order, so field order never affects
    /// the result.
    pub fn structural<R: Record>(record: &R) -> Result<Self> {
        let value = serde_json::to_value(record)?;
        Ok(Self(serde_json::to_string(&value)?))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type KeyFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// How rows are identified for selection.
pub enum Identity<R> {
    /// Rows are equal when their serialized content is equal.
    Structural,
    /// Rows are equal when the accessor returns the same key.
    Keyed(KeyFn<R>),
}

impl<R> Default for Identity<R> {
    fn default() -> Self {
        Identity::Structural
    }
}

impl<R> Clone for Identity<R> {
    fn clone(&self) -> Self {
        match self {
            Identity::Structural => Identity::Structural,
            Identity::Keyed(f) => Identity::Keyed(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Identity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Structural => f.write_str("Structural"),
            Identity::Keyed(_) => f.write_str("Keyed(..)"),
        }
    }
}

impl<R: Record> Identity<R> {
    /// Identify rows by a host-supplied key, such as a primary key.
    pub fn keyed(key: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        Identity::Keyed(Arc::new(key))
    }

    /// Compute the key of a record.
    pub fn key_of(&self, record: &R) -> Result<RowKey> {
        match self {
            Identity::Structural => RowKey::structural(record),
            Identity::Keyed(f) => Ok(RowKey(f(record))),
        }
    }
}
