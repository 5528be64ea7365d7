//! Text utilities for display-width-aware formatting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate text to a display width, appending an ellipsis when truncated.
///
/// Widths are measured in terminal cells, not bytes or chars, so wide
/// characters count double.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let limit = max_width - 1; // reserve one cell for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pad text with trailing spaces up to a display width.
///
/// Text wider than `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + (width - current));
    out.push_str(text);
    for _ in current..width {
        out.push(' ');
    }
    out
}
