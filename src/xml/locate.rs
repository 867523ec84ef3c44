/// Maps a byte offset into `text` to a 1-based `(line, column)` pair.
///
/// The column resets to 0 on every newline and grows by one per byte after
/// that, so the first byte of a new line reports column 0 and the byte after
/// it column 1. Existing consumers of the error messages rely on this, keep it.
///
/// Offsets past the end of `text` are clamped to its length.
pub fn locate(text: &str, offset: usize) -> (usize, usize) {
    let end = offset.min(text.len());
    let mut line = 1;
    let mut column = 1;

    for &byte in &text.as_bytes()[..end] {
        if byte == b'\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_zero_is_first_column() {
        assert_eq!(locate("<rss>", 0), (1, 1));
    }

    #[test]
    fn test_counts_bytes_on_first_line() {
        assert_eq!(locate("<rss><channel>", 5), (1, 6));
    }

    #[test]
    fn test_column_resets_after_newline() {
        let text = "<rss>\n<channel>\n<item>";
        // Offset of '<' in "<channel>"
        assert_eq!(locate(text, 6), (2, 0));
        assert_eq!(locate(text, 7), (2, 1));
        // Offset of '<' in "<item>"
        assert_eq!(locate(text, 16), (3, 0));
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        assert_eq!(locate("ab\ncd", 100), (2, 2));
    }

    #[test]
    fn test_multibyte_characters_count_per_byte() {
        // "é" is two bytes in UTF-8
        assert_eq!(locate("é<", 2), (1, 3));
    }
}
