//! Rendered cell content.

pub use crossterm::style::Color;

/// Visual attributes applied to a cell when it is drawn to a terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Dimmed text.
    pub dim: bool,
    /// Italic text.
    pub italic: bool,
}

/// Presentation output for one cell.
///
/// Produced by a column's renderer, or from the raw field value when the
/// column has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Text content.
    pub text: String,
    /// Visual attributes.
    pub style: CellStyle,
}

impl Cell {
    /// Create a plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    pub fn fg(mut self, color: Color) -> Self {
        self.style.fg = Some(color);
        self
    }

    /// Render the text bold.
    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    /// Render the text dimmed.
    pub fn dim(mut self) -> Self {
        self.style.dim = true;
        self
    }

    /// Render the text italic.
    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::text(text)
    }
}
