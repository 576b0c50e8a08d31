//! The table instance: data, columns, options, selection and sort state.

use std::cmp::Ordering;

use crate::column::{self, Column};
use crate::config::{SortExecution, TableOptions};
use crate::error::{Result, TableError};
use crate::events::TableListener;
use crate::input::{Cursor, TableAction};
use crate::record::{Fields, Identity, Record};
use crate::selection::{CheckState, Selection};
use crate::sort::{Comparators, SortController, SortIndicator, SortState};

/// A selectable, sortable table over records of type `R`.
///
/// Every mutation that changes the selection calls
/// [`TableListener::on_row_select`] before returning, and every accepted
/// sort activation calls [`TableListener::on_sort`].
///
/// # Example
///
/// ```ignore
/// let mut table = DataTable::new(users, columns)?
///     .with_options(TableOptions::default().with_selectable(true))
///     .with_listener(Callbacks::new().with_row_select(|rows: &[User]| {
///         log::info!("{} selected", rows.len());
///     }));
///
/// table.toggle_all();
/// table.activate_sort("name");
/// let view = table.view();
/// ```
pub struct DataTable<R: Record, L: TableListener<R> = ()> {
    pub(crate) data: Vec<R>,
    /// Serialized fields, parallel to `data`.
    pub(crate) fields: Vec<Fields>,
    pub(crate) columns: Vec<Column<R>>,
    pub(crate) options: TableOptions,
    pub(crate) selection: Selection<R>,
    pub(crate) sort: SortController,
    comparators: Comparators<R>,
    /// Data indices in display order.
    pub(crate) order: Vec<usize>,
    pub(crate) cursor: Cursor,
    listener: L,
}

impl<R: Record> DataTable<R> {
    /// Create a table with default options and no listener.
    pub fn new(data: Vec<R>, columns: Vec<Column<R>>) -> Result<Self> {
        column::validate_columns(&columns)?;
        let mut table = Self {
            data: Vec::new(),
            fields: Vec::new(),
            columns,
            options: TableOptions::default(),
            selection: Selection::default(),
            sort: SortController::new(),
            comparators: Comparators::new(),
            order: Vec::new(),
            cursor: Cursor::default(),
            listener: (),
        };
        table.set_data(data);
        Ok(table)
    }
}

impl<R: Record, L: TableListener<R>> DataTable<R, L> {
    /// Attach a listener, replacing the current one.
    pub fn with_listener<M: TableListener<R>>(self, listener: M) -> DataTable<R, M> {
        DataTable {
            data: self.data,
            fields: self.fields,
            columns: self.columns,
            options: self.options,
            selection: self.selection,
            sort: self.sort,
            comparators: self.comparators,
            order: self.order,
            cursor: self.cursor,
            listener,
        }
    }

    /// Set the options.
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Set how rows are identified for selection. Clears the selection.
    pub fn with_identity(mut self, identity: Identity<R>) -> Self {
        self.selection = Selection::new(identity);
        self
    }

    /// Register a comparator for a column.
    pub fn with_comparator(
        mut self,
        key: &str,
        cmp: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    ) -> Result<Self> {
        if column::find(&self.columns, key).is_none() {
            return Err(TableError::UnknownColumn(key.to_string()));
        }
        self.comparators.insert(key, cmp);
        self.reorder();
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The records, in data order.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Current options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// The attached listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// The attached listener, mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Data indices in display order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Records in display order.
    pub fn rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.order.iter().map(|&i| &self.data[i])
    }

    /// Focused display position.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor.position()
    }

    // -------------------------------------------------------------------------
    // Host updates
    // -------------------------------------------------------------------------

    /// Replace the records.
    ///
    /// The selection is kept as is; call [`prune_selection`] to drop rows
    /// that are no longer present.
    ///
    /// [`prune_selection`]: Self::prune_selection
    pub fn set_data(&mut self, data: Vec<R>) {
        self.fields = data.iter().map(Fields::of_lossy).collect();
        self.data = data;
        self.reorder();
        self.cursor.clamp(self.data.len());
        log::debug!("Table data set: {} rows", self.data.len());
    }

    /// Replace the column descriptors.
    ///
    /// An active sort on a column that is gone or no longer sortable is
    /// cleared.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<()> {
        column::validate_columns(&columns)?;
        self.columns = columns;
        if let Some(key) = self.sort.state().key.clone() {
            let still_sortable = column::find(&self.columns, &key).is_some_and(|c| c.sortable);
            if !still_sortable {
                log::debug!("Clearing sort on '{}': column no longer sortable", key);
                self.sort.clear();
            }
        }
        self.reorder();
        Ok(())
    }

    /// Replace the options.
    ///
    /// Turning sorting off globally clears the active sort.
    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        if !self.options.sortable && self.sort.state().key.is_some() {
            log::debug!("Clearing sort: sorting disabled");
            self.sort.clear();
        }
        self.reorder();
    }

    /// Show or hide the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Replace the selection with a host-controlled value.
    ///
    /// Controlled updates do not notify the listener.
    pub fn set_selection(&mut self, records: Vec<R>) -> Result<()> {
        self.selection.set(records)
    }

    /// Drop selected rows that are no longer in the data.
    pub fn prune_selection(&mut self) -> bool {
        let changed = self.selection.retain(&self.data);
        if changed {
            self.notify_selection();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn selection_enabled(&self) -> bool {
        if !self.options.selectable {
            log::trace!("Selection ignored: table not selectable");
            return false;
        }
        if self.options.loading {
            log::trace!("Selection ignored: table loading");
            return false;
        }
        true
    }

    /// Select every row, or clear the selection when all are selected.
    pub fn toggle_all(&mut self) -> bool {
        if !self.selection_enabled() {
            return false;
        }
        let changed = self.selection.toggle_all(&self.data);
        if changed {
            log::debug!("Toggle all: {} selected", self.selection.len());
            self.notify_selection();
        }
        changed
    }

    /// Toggle a single record.
    ///
    /// A record that is not selected is only added when it matches a row of
    /// the data; selected records can always be deselected.
    pub fn toggle_row(&mut self, record: &R) -> bool {
        if !self.selection_enabled() {
            return false;
        }
        match self.selection.toggle_within(record, &self.data) {
            Ok(false) => {
                log::trace!("Toggle ignored: record is not a row of the table");
                false
            }
            Ok(changed) => {
                if changed {
                    log::debug!("Toggle row: {} selected", self.selection.len());
                    self.notify_selection();
                }
                changed
            }
            Err(e) => {
                log::warn!("Cannot toggle row: {}", e);
                false
            }
        }
    }

    /// Toggle the row at a display position.
    pub fn toggle_row_at(&mut self, position: usize) -> bool {
        let Some(&index) = self.order.get(position) else {
            log::trace!("Toggle ignored: no row at position {}", position);
            return false;
        };
        let record = self.data[index].clone();
        self.toggle_row(&record)
    }

    /// Check if a record is selected.
    pub fn is_selected(&self, record: &R) -> bool {
        self.selection.is_selected(record)
    }

    /// Selected records, in the order they were selected.
    pub fn selected(&self) -> &[R] {
        self.selection.records()
    }

    /// Whether every row is selected. False when there are no rows.
    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.data.len())
    }

    /// Whether some, but not all, rows are selected.
    pub fn partially_selected(&self) -> bool {
        self.selection.partially_selected(self.data.len())
    }

    /// State of the "select all" checkbox.
    pub fn check_state(&self) -> CheckState {
        self.selection.check_state(self.data.len())
    }

    fn notify_selection(&mut self) {
        self.listener.on_row_select(self.selection.records());
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Whether a column is sortable, taking the global switch into account.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.options.sortable && column::find(&self.columns, key).is_some_and(|c| c.sortable)
    }

    /// Activate sorting on a column.
    ///
    /// Ignored while loading, when sorting is disabled, or when the column is
    /// unknown or not sortable. Returns whether the activation was accepted.
    pub fn activate_sort(&mut self, key: &str) -> bool {
        if self.options.loading {
            log::trace!("Sort on '{}' ignored: table loading", key);
            return false;
        }
        let Some((key, direction)) = self.sort.activate(key, &self.columns, self.options.sortable)
        else {
            return false;
        };
        log::debug!("Sort: {} {}", key, direction);
        self.reorder();
        self.listener.on_sort(&key, direction);
        true
    }

    /// Header indicator for a column.
    pub fn indicator_for(&self, key: &str) -> SortIndicator {
        self.sort.indicator_for(key)
    }

    /// Current sort state.
    pub fn sort_state(&self) -> &SortState {
        self.sort.state()
    }

    /// Reset the sort state without notifying.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.reorder();
    }

    fn reorder(&mut self) {
        self.order = match self.options.sort_execution {
            SortExecution::Internal => {
                self.comparators
                    .order(&self.data, &self.fields, self.sort.state())
            }
            SortExecution::Host => (0..self.data.len()).collect(),
        };
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Apply an action. Returns whether any state changed.
    ///
    /// Nothing happens while loading.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        if self.options.loading {
            log::trace!("Action {:?} ignored: table loading", action);
            return false;
        }
        let len = self.order.len();
        match action {
            TableAction::CursorUp => self.cursor.up(len),
            TableAction::CursorDown => self.cursor.down(len),
            TableAction::CursorFirst => self.cursor.first(len),
            TableAction::CursorLast => self.cursor.last(len),
            TableAction::ToggleCursor => match self.cursor.position() {
                Some(position) => self.toggle_row_at(position),
                None => false,
            },
            TableAction::ToggleRow(position) => self.toggle_row_at(position),
            TableAction::ToggleAll => self.toggle_all(),
            TableAction::Sort(key) => self.activate_sort(&key),
            TableAction::SortColumn(n) => match self.columns.get(n) {
                Some(c) => {
                    let key = c.key.clone();
                    self.activate_sort(&key)
                }
                None => false,
            },
        }
    }
}
