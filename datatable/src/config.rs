//! Table options.

use serde::Deserialize;

/// Text shown in the empty state when none is configured.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data found";

/// Heading of the empty state.
pub const EMPTY_TITLE: &str = "No data found";

/// Placeholder rows shown while loading.
pub const DEFAULT_SKELETON_ROWS: usize = 5;

/// Who orders the rows when a sort is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortExecution {
    /// The table orders its view by the active column.
    #[default]
    Internal,
    /// The view keeps data order; the host re-sorts in response to
    /// `on_sort` and supplies the sorted data.
    Host,
}

/// Behavior flags for a table.
///
/// Every field has a default, so hosts can load partial option sets from
/// their own configuration files.
///
/// # Example
///
/// ```
/// use datatable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_selectable(true)
///     .with_empty_message("No users yet");
/// assert!(options.sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Show skeleton rows and ignore interaction.
    ///
    /// Default: false
    pub loading: bool,

    /// Show selection checkboxes and enable selection.
    ///
    /// Default: false
    pub selectable: bool,

    /// Global sort switch; columns may still opt out individually.
    ///
    /// Default: true
    pub sortable: bool,

    /// Text shown when there are no rows.
    ///
    /// Default: "No data found"
    pub empty_message: String,

    /// Number of skeleton rows while loading.
    ///
    /// Default: 5
    pub skeleton_rows: usize,

    /// Who orders the rows for the active sort.
    ///
    /// Default: internal
    pub sort_execution: SortExecution,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            loading: false,
            selectable: false,
            sortable: true,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            sort_execution: SortExecution::Internal,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Sets whether rows can be selected.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the global sort switch.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the number of skeleton rows.
    pub fn with_skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    /// Sets who orders the rows.
    pub fn with_sort_execution(mut self, execution: SortExecution) -> Self {
        self.sort_execution = execution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert!(!options.loading);
        assert!(!options.selectable);
        assert!(options.sortable);
        assert_eq!(options.empty_message, "No data found");
        assert_eq!(options.skeleton_rows, 5);
        assert_eq!(options.sort_execution, SortExecution::Internal);
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"selectable": true, "sort_execution": "host"}"#;
        let options: TableOptions = serde_json::from_str(json).unwrap();
        assert!(options.selectable);
        assert!(options.sortable);
        assert_eq!(options.sort_execution, SortExecution::Host);
        assert_eq!(options.empty_message, DEFAULT_EMPTY_MESSAGE);
    }
}
