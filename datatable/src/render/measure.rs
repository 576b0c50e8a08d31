//! Display-width measurement, truncation and alignment.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Align;

const ELLIPSIS: char = '…';

/// Terminal columns occupied by `s`.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cut `s` to at most `max_width` columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push(ELLIPSIS);
    result
}

/// Fit `s` into exactly `width` columns with the given alignment.
pub fn fit(s: &str, width: usize, align: Align) -> String {
    let text = truncate_to_width(s, width);
    let slack = width.saturating_sub(display_width(&text));
    let (left, right) = match align {
        Align::Left => (0, slack),
        Align::Right => (slack, 0),
        Align::Center => (slack / 2, slack - slack / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
