//! Column descriptors and cell renderers.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::cell::Cell;
use crate::error::{Result, TableError};
use crate::record::{display_value, Fields};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Custom rendering for the cells of one column.
///
/// Invoked with the cell's field value and the full record. Closures of the
/// form `Fn(&Value, &R) -> Cell` implement this trait.
pub trait CellRenderer<R>: Send + Sync {
    /// Produce the cell for `value`, taken from `record`.
    fn render(&self, value: &Value, record: &R) -> Cell;
}

impl<R, F> CellRenderer<R> for F
where
    F: Fn(&Value, &R) -> Cell + Send + Sync,
{
    fn render(&self, value: &Value, record: &R) -> Cell {
        self(value, record)
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: which field they show, the
/// header text, width, alignment, and whether the column is sortable.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("id", "ID").width(6).align(Align::Right),
///     Column::new("name", "Name"),
///     Column::new("status", "Status").sortable(false),
/// ];
/// ```
pub struct Column<R> {
    /// Field key this column reads from each record.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Whether this column responds to sort activation.
    pub sortable: bool,
    /// Fixed width in terminal columns. `None` sizes to content.
    pub width: Option<u16>,
    /// Horizontal alignment.
    pub align: Align,
    renderer: Option<Arc<dyn CellRenderer<R>>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            width: self.width,
            align: self.align,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("custom_render", &self.renderer.is_some())
            .finish()
    }
}

impl<R> Column<R> {
    /// Create a sortable, left-aligned column for the field `key`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: true,
            width: None,
            align: Align::Left,
            renderer: None,
        }
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Render cells with a custom renderer.
    pub fn render(mut self, renderer: impl CellRenderer<R> + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Whether the column has a custom renderer.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Produce the cell for `record`, whose serialized fields are `fields`.
    pub fn cell(&self, fields: &Fields, record: &R) -> Cell {
        let value = fields.get(&self.key);
        match &self.renderer {
            Some(renderer) => renderer.render(value, record),
            None => Cell::text(display_value(value)),
        }
    }
}

/// Reject column sets where two descriptors share a key.
pub(crate) fn validate_columns<R>(columns: &[Column<R>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(TableError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}

/// Find a column by key.
pub(crate) fn find<'a, R>(columns: &'a [Column<R>], key: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|c| c.key == key)
}
