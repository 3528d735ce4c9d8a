//! Unicode text utilities for terminal previews.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `s` in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` cells, ending with `tail` when
/// anything was cut. Returns `s` unchanged when it already fits.
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return tail.chars().take(max_width).collect();
    }
    let budget = max_width - tail_width;
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate("Green", 10, "…"), "Green");
    }

    #[test]
    fn truncate_with_tail() {
        assert_eq!(truncate("Make a choice", 8, "…"), "Make a …");
        assert_eq!(truncate("日本語", 5, "…"), "日本…");
    }

    #[test]
    fn truncate_tail_only() {
        assert_eq!(truncate("abcdef", 1, "…"), "…");
    }
}
