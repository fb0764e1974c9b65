/// Upper bound on extracted text, in characters.
pub const MAX_TEXT_CHARS: usize = 50_000;

/// Line separators, following the usual "universal newlines" set.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whitespace for trimming purposes. U+001F (unit separator) counts too,
/// the way the other information separators already break lines.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\x1f'
}

fn trim(text: &str) -> &str {
    text.trim_matches(is_trimmable)
}

/// Splits into lines, trims each, then splits every line on double spaces and
/// keeps the non-empty trimmed fragments, one per output line.
///
/// The double-space split is a layout heuristic: it breaks phrases that were
/// padded apart in the markup onto separate lines.
// TODO: replace the double-space split with block-boundary detection once
// report output no longer needs to match the current line layout.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(is_line_break)
        .map(trim)
        .flat_map(|line| line.split("  "))
        .map(trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut to the first `max_chars` characters, never splitting a code point.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_lines_and_drops_blanks() {
        let text = "  Hello world  \n\n   \n\t Test \r\n";
        assert_eq!(normalize_whitespace(text), "Hello world\nTest");
    }

    #[test]
    fn test_double_space_splits_fragments() {
        assert_eq!(normalize_whitespace("Green  claims"), "Green\nclaims");
        // three spaces: split leaves " b", which is then trimmed
        assert_eq!(normalize_whitespace("a   b"), "a\nb");
        // single spaces are preserved
        assert_eq!(normalize_whitespace("net zero by 2030"), "net zero by 2030");
    }

    #[test]
    fn test_unit_separator_is_trimmed() {
        assert_eq!(normalize_whitespace("\x1fHello\x1f"), "Hello");
        assert_eq!(normalize_whitespace("a\x1fb"), "a\x1fb");
        assert_eq!(normalize_whitespace("\x1f \x1f"), "");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   \n  \n"), "");
    }

    #[test]
    fn test_unicode_line_separators() {
        assert_eq!(normalize_whitespace("one\u{2028}two\u{85}three"), "one\ntwo\nthree");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(text, 4);
        assert_eq!(truncated, "éééé");
        assert_eq!(truncated.len(), 8);
    }

    #[test]
    fn test_truncate_shorter_text_untouched() {
        assert_eq!(truncate_chars("short".to_string(), MAX_TEXT_CHARS), "short");
        assert_eq!(truncate_chars("exact".to_string(), 5), "exact");
    }
}
