//! Presentation model derived from table state.
//!
//! [`DataTable::view`] snapshots everything a renderer needs: header cells
//! with sort affordance, the "select all" checkbox, body rows in display
//! order with their selection flags, and the footer summary.

use crate::cell::Cell;
use crate::column::Align;
use crate::config::EMPTY_TITLE;
use crate::events::TableListener;
use crate::record::Record;
use crate::selection::CheckState;
use crate::sort::SortIndicator;
use crate::table::DataTable;

/// A rendered snapshot of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Header row.
    pub header: HeaderView,
    /// Body content.
    pub body: BodyView,
    /// Summary line, present when rows are shown.
    pub footer: Option<String>,
}

/// Header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    /// "Select all" checkbox state, `None` when the table is not selectable.
    pub select_all: Option<CheckState>,
    /// One cell per column.
    pub cells: Vec<HeaderCell>,
}

/// One column header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Column alignment.
    pub align: Align,
    /// Fixed width hint.
    pub width: Option<u16>,
    /// Sort affordance, `None` when the column cannot be sorted.
    pub sort: Option<SortIndicator>,
}

/// Body content, in precedence order: loading, empty, rows.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    /// Placeholder rows while loading.
    Skeleton {
        /// Number of placeholder rows.
        rows: usize,
        /// Number of data columns.
        columns: usize,
        /// Whether a checkbox column is shown.
        checkbox: bool,
    },
    /// No rows to show.
    Empty {
        /// Heading.
        title: String,
        /// Configured message.
        message: String,
    },
    /// Data rows in display order.
    Rows(Vec<RowView>),
}

/// One data row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position of the record in the data.
    pub index: usize,
    /// Selection flag, `None` when the table is not selectable.
    pub selected: Option<bool>,
    /// Whether the cursor is on this row.
    pub focused: bool,
    /// One cell per column.
    pub cells: Vec<Cell>,
}

impl BodyView {
    /// Data rows, empty for skeleton and empty states.
    pub fn rows(&self) -> &[RowView] {
        match self {
            BodyView::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Summary line below the rows.
fn footer_text(total: usize, selected: Option<usize>) -> String {
    match selected {
        Some(n) if n > 0 => format!("{} of {} selected", n, total),
        _ => {
            let noun = if total == 1 { "result" } else { "results" };
            format!("Showing {} {}", total, noun)
        }
    }
}

impl<R: Record, L: TableListener<R>> DataTable<R, L> {
    /// Build the presentation model for the current state.
    pub fn view(&self) -> TableView {
        let selectable = self.options.selectable;

        let header = HeaderView {
            select_all: selectable.then(|| self.check_state()),
            cells: self
                .columns
                .iter()
                .map(|c| HeaderCell {
                    key: c.key.clone(),
                    label: c.header.clone(),
                    align: c.align,
                    width: c.width,
                    sort: (self.options.sortable && c.sortable)
                        .then(|| self.sort.indicator_for(&c.key)),
                })
                .collect(),
        };

        let body = if self.options.loading {
            BodyView::Skeleton {
                rows: self.options.skeleton_rows,
                columns: self.columns.len(),
                checkbox: selectable,
            }
        } else if self.data.is_empty() {
            BodyView::Empty {
                title: EMPTY_TITLE.to_string(),
                message: self.options.empty_message.clone(),
            }
        } else {
            let focused = self.cursor.position();
            let rows = self
                .order
                .iter()
                .enumerate()
                .map(|(position, &index)| {
                    let record = &self.data[index];
                    let fields = &self.fields[index];
                    RowView {
                        index,
                        selected: selectable.then(|| self.selection.is_selected(record)),
                        focused: focused == Some(position),
                        cells: self.columns.iter().map(|c| c.cell(fields, record)).collect(),
                    }
                })
                .collect();
            BodyView::Rows(rows)
        };

        let footer = (!self.options.loading && !self.data.is_empty()).then(|| {
            let selected = selectable.then(|| self.selection.len());
            footer_text(self.data.len(), selected)
        });

        TableView {
            header,
            body,
            footer,
        }
    }
}
