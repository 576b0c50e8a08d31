//! Sort state and row ordering.
//!
//! [`SortController`] tracks the single active column and its direction.
//! [`Comparators`] maps column keys to host comparators; columns without one
//! fall back to [`compare_values`] over the serialized field values.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::{self, Column};
use crate::record::Fields;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Short form, `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header affordance for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable but not the active column.
    Inactive,
    /// Active, ascending.
    Ascending,
    /// Active, descending.
    Descending,
}

/// The active sort key and its direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Active column key, if any.
    pub key: Option<String>,
    /// Direction of the active column.
    pub direction: SortDirection,
}

/// Tracks which column is sorted and in which direction.
#[derive(Debug, Clone, Default)]
pub struct SortController {
    state: SortState,
}

impl SortController {
    /// Create a controller with no active column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sort state.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Activate sorting on `key`.
    ///
    /// Ignored when sorting is disabled, the key names no column, or the
    /// column is not sortable. Re-activating the active ascending column
    /// flips it to descending; every other activation starts ascending.
    /// Returns the resulting key and direction when accepted.
    pub fn activate<R>(
        &mut self,
        key: &str,
        columns: &[Column<R>],
        enabled: bool,
    ) -> Option<(String, SortDirection)> {
        if !enabled {
            log::trace!("Sort on '{}' ignored: sorting disabled", key);
            return None;
        }
        match column::find(columns, key) {
            Some(c) if c.sortable => {}
            Some(_) => {
                log::trace!("Sort on '{}' ignored: column not sortable", key);
                return None;
            }
            None => {
                log::trace!("Sort on '{}' ignored: no such column", key);
                return None;
            }
        }

        let direction = match (&self.state.key, self.state.direction) {
            (Some(active), SortDirection::Ascending) if active == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.state = SortState {
            key: Some(key.to_string()),
            direction,
        };
        Some((key.to_string(), direction))
    }

    /// Header indicator for `key`.
    pub fn indicator_for(&self, key: &str) -> SortIndicator {
        match &self.state.key {
            Some(active) if active == key => match self.state.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Inactive,
        }
    }

    /// Reset to no active column.
    pub fn clear(&mut self) {
        self.state = SortState::default();
    }
}

/// Comparator for two records on one column.
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Column key to comparator registry.
pub struct Comparators<R> {
    by_key: HashMap<String, Comparator<R>>,
}

impl<R> Default for Comparators<R> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<R> Clone for Comparators<R> {
    fn clone(&self) -> Self {
        Self {
            by_key: self.by_key.clone(),
        }
    }
}

impl<R> fmt::Debug for Comparators<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.by_key.keys().collect();
        keys.sort();
        f.debug_struct("Comparators").field("keys", &keys).finish()
    }
}

impl<R> Comparators<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the comparator for `key`, replacing any previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        cmp: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    ) {
        self.by_key.insert(key.into(), Arc::new(cmp));
    }

    /// Comparator registered for `key`.
    pub fn get(&self, key: &str) -> Option<&Comparator<R>> {
        self.by_key.get(key)
    }

    /// Whether a comparator is registered for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Indices of `data` in display order for `state`.
    ///
    /// `fields` is parallel to `data`. With no active key the data order is
    /// kept. The sort is stable, so ties keep their data order in both
    /// directions.
    pub fn order(&self, data: &[R], fields: &[Fields], state: &SortState) -> Vec<usize> {
        let mut order: Vec<usize> = (0..data.len()).collect();
        let Some(key) = state.key.as_deref() else {
            return order;
        };

        let custom = self.get(key);
        order.sort_by(|&a, &b| {
            let ord = match custom {
                Some(cmp) => cmp(&data[a], &data[b]),
                None => compare_values(fields[a].get(key), fields[b].get(key)),
            };
            match state.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        order
    }
}

/// Generic ordering over field values.
///
/// Values of different kinds order as null < bool < number < string <
/// array < object. Numbers compare numerically, strings by code point,
/// arrays element-wise.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (x, y) in x.iter().zip(y) {
                let ord = compare_values(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
