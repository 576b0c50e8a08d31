//! Host notifications.
//!
//! A table reports every selection change and every accepted sort
//! activation to its [`TableListener`]. Notifications are delivered
//! synchronously, after the state change and before the operation returns.

use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

use crate::sort::SortDirection;

/// A notification emitted by a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<R> {
    /// The selection changed; carries the full new selection.
    RowSelect(Vec<R>),
    /// A sort activation was accepted.
    Sort {
        /// Column key.
        key: String,
        /// Resulting direction.
        direction: SortDirection,
    },
}

/// Receives table notifications.
///
/// Both methods default to doing nothing, so a listener only implements what
/// it cares about.
pub trait TableListener<R> {
    /// Called after every selection change with the full selection.
    fn on_row_select(&mut self, _selected: &[R]) {}

    /// Called after every accepted sort activation.
    fn on_sort(&mut self, _key: &str, _direction: SortDirection) {}
}

impl<R> TableListener<R> for () {}

/// Records every notification, in order.
impl<R: Clone> TableListener<R> for Vec<TableEvent<R>> {
    fn on_row_select(&mut self, selected: &[R]) {
        self.push(TableEvent::RowSelect(selected.to_vec()));
    }

    fn on_sort(&mut self, key: &str, direction: SortDirection) {
        self.push(TableEvent::Sort {
            key: key.to_string(),
            direction,
        });
    }
}

/// Forwards notifications into a channel.
///
/// A dropped receiver is not an error for the table; the event is discarded.
impl<R: Clone> TableListener<R> for UnboundedSender<TableEvent<R>> {
    fn on_row_select(&mut self, selected: &[R]) {
        if self.send(TableEvent::RowSelect(selected.to_vec())).is_err() {
            log::debug!("Table event receiver dropped, row select discarded");
        }
    }

    fn on_sort(&mut self, key: &str, direction: SortDirection) {
        let event = TableEvent::Sort {
            key: key.to_string(),
            direction,
        };
        if self.send(event).is_err() {
            log::debug!("Table event receiver dropped, sort discarded");
        }
    }
}

type RowSelectFn<R> = Box<dyn FnMut(&[R])>;
type SortFn = Box<dyn FnMut(&str, SortDirection)>;

/// Closure-based listener.
///
/// # Example
///
/// ```ignore
/// let callbacks = Callbacks::new()
///     .with_row_select(|rows: &[User]| println!("{} selected", rows.len()))
///     .with_sort(|key, direction| println!("sort {key} {direction}"));
/// ```
pub struct Callbacks<R> {
    row_select: Option<RowSelectFn<R>>,
    sort: Option<SortFn>,
}

impl<R> Default for Callbacks<R> {
    fn default() -> Self {
        Self {
            row_select: None,
            sort: None,
        }
    }
}

impl<R> fmt::Debug for Callbacks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_row_select", &self.row_select.is_some())
            .field("on_sort", &self.sort.is_some())
            .finish()
    }
}

impl<R> Callbacks<R> {
    /// Create a listener with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection callback.
    pub fn with_row_select(mut self, f: impl FnMut(&[R]) + 'static) -> Self {
        self.row_select = Some(Box::new(f));
        self
    }

    /// Set the sort callback.
    pub fn with_sort(mut self, f: impl FnMut(&str, SortDirection) + 'static) -> Self {
        self.sort = Some(Box::new(f));
        self
    }
}

impl<R> TableListener<R> for Callbacks<R> {
    fn on_row_select(&mut self, selected: &[R]) {
        if let Some(f) = self.row_select.as_mut() {
            f(selected);
        }
    }

    fn on_sort(&mut self, key: &str, direction: SortDirection) {
        if let Some(f) = self.sort.as_mut() {
            f(key, direction);
        }
    }
}
