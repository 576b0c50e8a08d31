//! Drawing a [`TableView`] as lines of text.
//!
//! [`layout`] turns a view into styled [`Line`]s. The [`text`] module joins
//! them into plain strings; the [`terminal`] module writes them with
//! crossterm styling.

pub mod measure;
pub mod terminal;
pub mod text;

use crate::cell::CellStyle;
use crate::column::Align;
use crate::selection::CheckState;
use crate::sort::SortIndicator;
use crate::view::{BodyView, TableView};

use measure::{display_width, fit};

/// Checkbox of a selected row, or "select all" when every row is selected.
pub const CHECKED: &str = "[x]";
/// Checkbox of an unselected row.
pub const UNCHECKED: &str = "[ ]";
/// "Select all" checkbox when some rows are selected.
pub const INDETERMINATE: &str = "[-]";

/// Header glyph of the column sorted ascending.
pub const SORT_ASCENDING: &str = "▲";
/// Header glyph of the column sorted descending.
pub const SORT_DESCENDING: &str = "▼";
/// Header glyph of a sortable, inactive column.
pub const SORT_INACTIVE: &str = "↕";

const SKELETON: char = '░';
const RULE: char = '─';
const CHECKBOX_WIDTH: usize = 3;

/// Layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces between columns.
    pub gap: usize,
    /// Upper bound for content-sized columns.
    pub max_column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gap: 2,
            max_column_width: 40,
        }
    }
}

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Column headers.
    Header,
    /// Horizontal separator.
    Rule,
    /// A data row.
    Row {
        /// Whether the row is selected.
        selected: bool,
        /// Whether the cursor is on the row.
        focused: bool,
    },
    /// Placeholder row while loading.
    Skeleton,
    /// Empty-state text.
    Empty,
    /// Summary line.
    Footer,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text content.
    pub text: String,
    /// Style of the whole run.
    pub style: CellStyle,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// What the line represents.
    pub kind: LineKind,
    /// Styled runs, left to right.
    pub segments: Vec<Segment>,
}

impl Line {
    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

fn checkbox_glyph(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => CHECKED,
        CheckState::Unchecked => UNCHECKED,
        CheckState::Indeterminate => INDETERMINATE,
    }
}

fn header_label(label: &str, sort: Option<SortIndicator>) -> String {
    match sort {
        None => label.to_string(),
        Some(SortIndicator::Inactive) => format!("{} {}", label, SORT_INACTIVE),
        Some(SortIndicator::Ascending) => format!("{} {}", label, SORT_ASCENDING),
        Some(SortIndicator::Descending) => format!("{} {}", label, SORT_DESCENDING),
    }
}

/// Column widths: fixed hints win, other columns size to header and cells.
fn column_widths(view: &TableView, options: &RenderOptions) -> Vec<usize> {
    view.header
        .cells
        .iter()
        .enumerate()
        .map(|(i, header)| {
            if let Some(w) = header.width {
                return usize::from(w).max(1);
            }
            let label = display_width(&header_label(&header.label, header.sort));
            let content = view
                .body
                .rows()
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| display_width(&cell.text))
                .max()
                .unwrap_or(0);
            label.max(content).clamp(1, options.max_column_width.max(1))
        })
        .collect()
}

/// Assemble one line from a checkbox slot and per-column segments.
fn join(kind: LineKind, checkbox: Option<Segment>, cells: Vec<Segment>, gap: usize) -> Line {
    let spacer = " ".repeat(gap);
    let mut segments = Vec::with_capacity(cells.len() * 2 + 2);
    for (i, segment) in checkbox.into_iter().chain(cells).enumerate() {
        if i > 0 {
            segments.push(Segment::plain(spacer.as_str()));
        }
        segments.push(segment);
    }
    Line { kind, segments }
}

fn centered(kind: LineKind, text: &str, width: usize, style: CellStyle) -> Line {
    let width = width.max(display_width(text));
    Line {
        kind,
        segments: vec![Segment::styled(fit(text, width, Align::Center), style)],
    }
}

/// Lay out a view as styled lines.
pub fn layout(view: &TableView, options: &RenderOptions) -> Vec<Line> {
    let widths = column_widths(view, options);
    let has_checkbox = view.header.select_all.is_some();
    let slots = widths.len() + usize::from(has_checkbox);
    let total = widths.iter().sum::<usize>()
        + if has_checkbox { CHECKBOX_WIDTH } else { 0 }
        + options.gap * slots.saturating_sub(1);

    let bold = CellStyle {
        bold: true,
        ..CellStyle::default()
    };
    let dim = CellStyle {
        dim: true,
        ..CellStyle::default()
    };
    let rule = Line {
        kind: LineKind::Rule,
        segments: vec![Segment::plain(RULE.to_string().repeat(total))],
    };

    let mut lines = Vec::new();

    let header_cells = view
        .header
        .cells
        .iter()
        .zip(&widths)
        .map(|(h, &w)| Segment::styled(fit(&header_label(&h.label, h.sort), w, h.align), bold))
        .collect();
    let select_all = view
        .header
        .select_all
        .map(|state| Segment::styled(checkbox_glyph(state), bold));
    lines.push(join(LineKind::Header, select_all, header_cells, options.gap));
    lines.push(rule.clone());

    match &view.body {
        BodyView::Skeleton { rows, checkbox, .. } => {
            for _ in 0..*rows {
                let cells = widths
                    .iter()
                    .map(|&w| {
                        let bar = SKELETON.to_string().repeat((w * 3 / 4).max(1));
                        Segment::styled(fit(&bar, w, Align::Left), dim)
                    })
                    .collect();
                let checkbox = checkbox
                    .then(|| Segment::styled(SKELETON.to_string().repeat(CHECKBOX_WIDTH), dim));
                lines.push(join(LineKind::Skeleton, checkbox, cells, options.gap));
            }
        }
        BodyView::Empty { title, message } => {
            lines.push(centered(LineKind::Empty, title, total, bold));
            lines.push(centered(LineKind::Empty, message, total, dim));
        }
        BodyView::Rows(rows) => {
            for row in rows {
                let cells = row
                    .cells
                    .iter()
                    .zip(&view.header.cells)
                    .zip(&widths)
                    .map(|((cell, header), &w)| {
                        Segment::styled(fit(&cell.text, w, header.align), cell.style)
                    })
                    .collect();
                let checkbox = row.selected.map(|selected| {
                    let glyph = if selected { CHECKED } else { UNCHECKED };
                    Segment::plain(glyph)
                });
                let kind = LineKind::Row {
                    selected: row.selected.unwrap_or(false),
                    focused: row.focused,
                };
                lines.push(join(kind, checkbox, cells, options.gap));
            }
        }
    }

    if let Some(footer) = &view.footer {
        lines.push(rule);
        lines.push(Line {
            kind: LineKind::Footer,
            segments: vec![Segment::styled(footer.as_str(), dim)],
        });
    }

    lines
}
