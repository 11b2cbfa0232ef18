//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation so content blitted into a box
//! stays aligned with the solved geometry even when it carries escape
//! sequences.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_counts_cells() {
        assert_eq!(display_width("status"), 6);
    }

    #[test]
    fn ansi_escapes_are_invisible() {
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("日本"), 4);
    }
}
