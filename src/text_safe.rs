//! Display-safe text helpers for data-file strings.
//!
//! Word data comes from user-edited files, so anything shown in the terminal is
//! stripped of escape sequences first and then clipped by display columns, never
//! by bytes, so wide glyphs are not split.

use strip_ansi_escapes::strip;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Remove ANSI escapes and control characters (tabs become spaces).
pub fn sanitize(s: &str) -> String {
    let ansi_free = strip(s.replace('\t', " ").as_bytes());
    String::from_utf8_lossy(&ansi_free)
        .chars()
        .filter_map(|c| match c {
            c if c.is_control() => None,
            '\u{200B}' | '\u{FEFF}' => None,
            c => Some(c),
        })
        .collect()
}

/// Prefix of `s` that fits in `width_cols` display columns.
pub fn prefix_by_columns(s: &str, width_cols: usize) -> &str {
    let mut col = 0usize;
    for (idx, ch) in s.char_indices() {
        let next = col.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
        if next > width_cols {
            return &s[..idx];
        }
        col = next;
    }
    s
}

/// Fit `s` into `width_cols` columns, ending with an ellipsis when clipped.
pub fn fit_columns(s: &str, width_cols: usize) -> String {
    if UnicodeWidthStr::width(s) <= width_cols {
        return s.to_string();
    }
    if width_cols == 0 {
        return String::new();
    }
    format!("{}…", prefix_by_columns(s, width_cols - 1))
}

/// Trailing part of `s` that fits in `width_cols` columns, used to keep the
/// cursor end of a long input visible.
pub fn suffix_by_columns(s: &str, width_cols: usize) -> &str {
    let mut col = 0usize;
    for (idx, ch) in s.char_indices().rev() {
        let next = col.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
        if next > width_cols {
            return &s[idx + ch.len_utf8()..];
        }
        col = next;
    }
    s
}
