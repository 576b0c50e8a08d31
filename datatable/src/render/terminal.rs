//! Styled terminal output via crossterm.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use super::{layout, LineKind, RenderOptions, Segment};
use crate::view::TableView;

/// Background of selected rows.
const SELECTED_BG: Color = Color::DarkBlue;

fn write_segment<W: Write>(out: &mut W, segment: &Segment) -> io::Result<()> {
    let style = segment.style;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    queue!(out, Print(&segment.text))?;
    if style.bold || style.dim || style.italic {
        queue!(out, SetAttribute(Attribute::NormalIntensity))?;
        if style.italic {
            queue!(out, SetAttribute(Attribute::NoItalic))?;
        }
    }
    if style.fg.is_some() {
        queue!(out, SetForegroundColor(Color::Reset))?;
    }
    Ok(())
}

/// Write a view with styling.
///
/// Lines end with `\r\n` so the output is correct in raw mode. The writer
/// is flushed at the end.
pub fn write_view<W: Write>(
    out: &mut W,
    view: &TableView,
    options: &RenderOptions,
) -> io::Result<()> {
    for line in layout(view, options) {
        if let LineKind::Row { selected, focused } = line.kind {
            if selected {
                queue!(out, SetBackgroundColor(SELECTED_BG))?;
            }
            if focused {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
        }
        for segment in &line.segments {
            write_segment(out, segment)?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print("\r\n"))?;
    }
    out.flush()
}
