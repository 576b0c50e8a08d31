//! A typed table state machine for terminal UIs.
//!
//! [`DataTable`] holds host records, column descriptors and options. It
//! manages a selection set with an indeterminate "select all" state and a
//! single-column sort, reports changes to a [`TableListener`], and derives a
//! [`TableView`] that the [`render`] module draws as text.
//!
//! Records are any `Serialize + Clone` type; cells are read from the
//! record's serialized fields by column key.

pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod record;
pub mod render;
pub mod selection;
pub mod sort;
pub mod table;
pub mod view;

pub use cell::{Cell, CellStyle, Color};
pub use column::{Align, CellRenderer, Column};
pub use config::{SortExecution, TableOptions};
pub use error::{Result, TableError};
pub use events::{Callbacks, TableEvent, TableListener};
pub use input::{action_for_key, Cursor, TableAction};
pub use record::{Fields, Identity, Record, RowKey};
pub use render::RenderOptions;
pub use selection::{CheckState, Selection};
pub use sort::{SortController, SortDirection, SortIndicator, SortState};
pub use table::DataTable;
pub use view::{BodyView, HeaderCell, HeaderView, RowView, TableView};
