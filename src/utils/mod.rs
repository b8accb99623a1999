//! Text measuring helpers for terminal output
//!
//! Widths are display columns (via `unicode-width`), not bytes or chars, so
//! wide glyphs and combining marks line up with what the terminal draws.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended when a label had to be shortened
pub const ELLIPSIS: char = '…';

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` so it occupies at most `max_width` columns.
///
/// When anything is removed the last visible column becomes an ellipsis.
///
/// # Examples
/// ```
/// use termenu::utils::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Settings", 20), "Settings");
/// assert_eq!(truncate_to_width("Settings", 5), "Sett…");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Right-pad `text` with spaces up to `width` columns (no truncation).
///
/// Unlike `{:width$}`, this counts display columns, so wide glyphs align.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("OK", 2), "OK");
        assert_eq!(truncate_to_width("", 0), "");
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("日本"), 4);
        // Budget of 3 columns leaves room for one wide glyph plus the ellipsis
        assert_eq!(truncate_to_width("日本語", 3), "日…");
    }

    #[test]
    fn zero_width_budget_yields_empty() {
        assert_eq!(truncate_to_width("Anything", 0), "");
        assert_eq!(truncate_to_width("Anything", 1), "…");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
        assert_eq!(pad_to_width("日", 4), "日  ");
    }
}
