//! Plain-text rendering.

use super::{layout, RenderOptions};
use crate::view::TableView;

/// Render a view as plain lines, trailing spaces removed.
pub fn render_lines(view: &TableView, options: &RenderOptions) -> Vec<String> {
    layout(view, options)
        .iter()
        .map(|line| line.text().trim_end().to_string())
        .collect()
}

/// Render a view as one newline-separated string.
pub fn render_to_string(view: &TableView, options: &RenderOptions) -> String {
    render_lines(view, options).join("\n")
}
