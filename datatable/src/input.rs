//! Keyboard interaction.
//!
//! Key events map to [`TableAction`]s, which [`DataTable::dispatch`]
//! applies with the same rules as the direct operations.
//!
//! [`DataTable::dispatch`]: crate::DataTable::dispatch

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// An interaction with the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Move the cursor one row up.
    CursorUp,
    /// Move the cursor one row down.
    CursorDown,
    /// Move the cursor to the first row.
    CursorFirst,
    /// Move the cursor to the last row.
    CursorLast,
    /// Toggle the row under the cursor.
    ToggleCursor,
    /// Toggle the row at a display position.
    ToggleRow(usize),
    /// Toggle every row.
    ToggleAll,
    /// Activate sorting on a column key.
    Sort(String),
    /// Activate sorting on the n-th column (zero based).
    SortColumn(usize),
}

/// Map a key event to a table action.
///
/// Up/Down (or k/j) and Home/End move the cursor, Space toggles the
/// current row, `a` toggles every row, and `1`-`9` sort by that column.
pub fn action_for_key(key: &KeyEvent) -> Option<TableAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(TableAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(TableAction::CursorDown),
        KeyCode::Home => Some(TableAction::CursorFirst),
        KeyCode::End => Some(TableAction::CursorLast),
        KeyCode::Char(' ') => Some(TableAction::ToggleCursor),
        KeyCode::Char('a') => Some(TableAction::ToggleAll),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10)? as usize;
            Some(TableAction::SortColumn(n - 1))
        }
        _ => None,
    }
}

/// Focused row position in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Option<usize>,
}

impl Cursor {
    /// Current position, if any row is focused.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Move up one row. Returns whether the position changed.
    pub fn up(&mut self, len: usize) -> bool {
        let next = match self.position {
            _ if len == 0 => None,
            Some(p) => Some(p.saturating_sub(1)),
            None => Some(len - 1),
        };
        self.set(next)
    }

    /// Move down one row. Returns whether the position changed.
    pub fn down(&mut self, len: usize) -> bool {
        let next = match self.position {
            _ if len == 0 => None,
            Some(p) => Some((p + 1).min(len - 1)),
            None => Some(0),
        };
        self.set(next)
    }

    /// Move to the first row.
    pub fn first(&mut self, len: usize) -> bool {
        self.set((len > 0).then_some(0))
    }

    /// Move to the last row.
    pub fn last(&mut self, len: usize) -> bool {
        self.set(len.checked_sub(1))
    }

    /// Keep the cursor inside `len` rows after the data changes.
    pub fn clamp(&mut self, len: usize) {
        self.position = match self.position {
            Some(_) if len == 0 => None,
            Some(p) => Some(p.min(len - 1)),
            None => None,
        };
    }

    fn set(&mut self, next: Option<usize>) -> bool {
        let changed = self.position != next;
        self.position = next;
        changed
    }
}
