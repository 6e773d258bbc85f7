use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Wide characters (CJK, most emoji) count as 2, combining marks as 0.
///
/// ```
/// use vidly::util::display_width;
///
/// assert_eq!(display_width("Die Hard"), 8);
/// assert_eq!(display_width("♥"), 1);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to at most `max_width` columns, appending `...` when
/// text is cut.
///
/// Widths of 3 or less have no room for an ellipsis, so the string is cut
/// bare. Borrows when nothing needs to change.
///
/// ```
/// use vidly::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Terminator", 20), "Terminator");
/// assert_eq!(truncate_to_width("Wedding Crashers", 10), "Wedding...");
/// assert_eq!(truncate_to_width("Airplane", 3), "Air");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(s[..fit_prefix(s, max_width)].to_string());
    }
    let cut = fit_prefix(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
}

/// Byte length of the longest prefix of `s` that fits in `width` columns.
fn fit_prefix(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return idx;
        }
        used += w;
    }
    s.len()
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Movie titles and genre names come from the network and are rendered
/// straight into the terminal, so CSI (`ESC [ ... final`), OSC
/// (`ESC ] ... BEL|ST`) and bare ESC are removed along with C0 controls and
/// DEL. Tab, LF and CR survive. Borrows when the input is already clean.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_control(c: char) -> bool {
        c == '\u{7f}' || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
    }

    if !s.chars().any(is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameter and intermediate bytes up to the final byte
                    for c in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\u{07}' {
                            break;
                        }
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            c if is_control(c) => {}
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits_borrows() {
        let result = truncate_to_width("Get Out", 7);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Get Out");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        // 10 columns: 7 of text plus "..."
        assert_eq!(truncate_to_width("The Sixth Sense", 10), "The Six...");
        assert_eq!(truncate_to_width("Terminator", 4), "T...");
    }

    #[test]
    fn test_truncate_narrow_widths_have_no_ellipsis() {
        assert_eq!(truncate_to_width("Terminator", 0), "");
        assert_eq!(truncate_to_width("Terminator", 1), "T");
        assert_eq!(truncate_to_width("Terminator", 3), "Ter");
    }

    #[test]
    fn test_truncate_wide_chars_respect_boundaries() {
        // Each CJK character is 2 columns
        assert_eq!(truncate_to_width("七人の侍", 7), "七人...");
        assert_eq!(truncate_to_width("七人の侍", 3), "七");
        assert_eq!(truncate_to_width("七人の侍", 1), "");
    }

    #[test]
    fn test_strip_clean_borrows() {
        let result = strip_control_chars("Trip to Italy");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mGone Girl\x1b[0m"), "Gone Girl");
        assert_eq!(strip_control_chars("\x1b]0;pwned\x07Airplane"), "Airplane");
        assert_eq!(strip_control_chars("\x1b]0;pwned\x1b\\Airplane"), "Airplane");
        assert_eq!(strip_control_chars("Die\x1b Hard"), "Die Hard");
    }

    #[test]
    fn test_strip_controls_keeps_whitespace() {
        assert_eq!(strip_control_chars("a\x00b\x07c\x7fd\te\n"), "abcd\te\n");
    }

    #[test]
    fn test_strip_keeps_unicode() {
        assert_eq!(strip_control_chars("七人\x1b[1mの侍"), "七人の侍");
    }
}
