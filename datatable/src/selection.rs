//! Selection set management.
//!
//! Rows are tracked by [`RowKey`], computed through the table's
//! [`Identity`]. Members keep the order in which they were selected, and a
//! snapshot taken by "select all" keeps duplicate rows so the set size can
//! match the data size.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::record::{Identity, Record, RowKey};

/// Aggregate state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Nothing selected.
    Unchecked,
    /// Some, but not all, rows selected.
    Indeterminate,
    /// Every row selected.
    Checked,
}

/// Tracks selected records by their row keys.
#[derive(Debug, Clone)]
pub struct Selection<R> {
    identity: Identity<R>,
    /// Selected records in selection order.
    members: Vec<R>,
    /// Keys parallel to `members`.
    keys: Vec<RowKey>,
    /// Number of members per key.
    counts: HashMap<RowKey, usize>,
}

impl<R: Record> Default for Selection<R> {
    fn default() -> Self {
        Self::new(Identity::Structural)
    }
}

impl<R: Record> Selection<R> {
    /// Create an empty selection using `identity` for membership.
    pub fn new(identity: Identity<R>) -> Self {
        Self {
            identity,
            members: Vec::new(),
            keys: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// The identity scheme in use.
    pub fn identity(&self) -> &Identity<R> {
        &self.identity
    }

    /// Selected records, in the order they were selected.
    pub fn records(&self) -> &[R] {
        &self.members
    }

    /// Number of selected records.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if a key is selected.
    pub fn contains_key(&self, key: &RowKey) -> bool {
        self.counts.contains_key(key)
    }

    /// Check if a record is selected.
    ///
    /// A record whose key cannot be computed is never selected.
    pub fn is_selected(&self, record: &R) -> bool {
        self.identity
            .key_of(record)
            .is_ok_and(|key| self.contains_key(&key))
    }

    /// Whether every one of `total` rows is selected. Never true for zero rows.
    pub fn all_selected(&self, total: usize) -> bool {
        total > 0 && self.len() == total
    }

    /// Whether some, but not all, of `total` rows are selected.
    pub fn partially_selected(&self, total: usize) -> bool {
        !self.is_empty() && self.len() < total
    }

    /// State of the "select all" checkbox for `total` rows.
    pub fn check_state(&self, total: usize) -> CheckState {
        if self.all_selected(total) {
            CheckState::Checked
        } else if self.partially_selected(total) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Toggle a single record.
    ///
    /// Removes every member sharing the record's key, or appends the record
    /// when it is not selected. Returns `Ok(true)`: a toggle always changes
    /// the set.
    pub fn toggle(&mut self, record: &R) -> Result<bool> {
        let key = self.identity.key_of(record)?;
        if self.counts.remove(&key).is_some() {
            let mut i = 0;
            while i < self.keys.len() {
                if self.keys[i] == key {
                    self.keys.remove(i);
                    self.members.remove(i);
                } else {
                    i += 1;
                }
            }
        } else {
            self.push(key, record.clone());
        }
        Ok(true)
    }

    /// Toggle a single record, selecting it only when it is a row of `data`.
    ///
    /// Deselecting always works, so stale members can still be removed.
    /// Returns `Ok(false)` when the record is unselected and absent from
    /// `data`.
    pub fn toggle_within(&mut self, record: &R, data: &[R]) -> Result<bool> {
        let key = self.identity.key_of(record)?;
        if !self.contains_key(&key) {
            let present = data
                .iter()
                .any(|row| self.identity.key_of(row).is_ok_and(|k| k == key));
            if !present {
                return Ok(false);
            }
        }
        self.toggle(record)
    }

    /// Select every row of `data`, or clear when all are already selected.
    ///
    /// Returns whether the selection changed. Rows whose key cannot be
    /// computed are skipped.
    pub fn toggle_all(&mut self, data: &[R]) -> bool {
        if self.all_selected(data.len()) {
            return self.clear();
        }
        if data.is_empty() && self.is_empty() {
            return false;
        }

        let before = std::mem::take(&mut self.keys);
        self.members.clear();
        self.counts.clear();
        for record in data {
            match self.identity.key_of(record) {
                Ok(key) => self.push(key, record.clone()),
                Err(e) => log::warn!("Skipping unidentifiable row in select all: {}", e),
            }
        }
        before != self.keys
    }

    /// Replace the whole selection.
    pub fn set(&mut self, records: impl IntoIterator<Item = R>) -> Result<()> {
        let mut next = Selection::new(self.identity.clone());
        for record in records {
            let key = next.identity.key_of(&record)?;
            next.push(key, record);
        }
        *self = next;
        Ok(())
    }

    /// Drop members whose key no longer appears in `data`.
    ///
    /// Returns whether anything was removed.
    pub fn retain(&mut self, data: &[R]) -> bool {
        let present: HashSet<RowKey> = data
            .iter()
            .filter_map(|record| self.identity.key_of(record).ok())
            .collect();

        let before = self.len();
        let mut kept = Selection::new(self.identity.clone());
        for (key, record) in self.keys.drain(..).zip(self.members.drain(..)) {
            if present.contains(&key) {
                kept.push(key, record);
            }
        }
        *self = kept;
        self.len() != before
    }

    /// Clear all selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.members.clear();
        self.keys.clear();
        self.counts.clear();
        changed
    }

    fn push(&mut self, key: RowKey, record: R) {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        self.keys.push(key);
        self.members.push(record);
    }
}
