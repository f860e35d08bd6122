//! Shared text layout helpers
//!
//! Unit suffixes (万/億/兆/円) are double-width in a terminal, so column
//! alignment works on display width, not bytes or chars.

use unicode_width::UnicodeWidthStr;

/// Terminal display width of `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-pad `s` with spaces to `width` display columns.
///
/// # Examples
///
/// ```
/// use yen_units::util::pad_start;
///
/// assert_eq!(pad_start("150万円", 10), "   150万円");
/// ```
pub fn pad_start(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(pad), s)
}

/// Right-pad `s` with spaces to `width` display columns.
pub fn pad_end(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut `s` to at most `max_width` display columns on a char boundary.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            return &s[..idx];
        }
        used += w;
    }
    s
}
