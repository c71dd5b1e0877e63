/// Split document text into trimmed lines, dropping short ones.
///
/// A line survives only if its trimmed length is strictly greater than
/// `min_chars` characters. Length is counted in chars, not bytes, so
/// accented names are not penalised.
pub fn normalize_lines(text: &str, min_chars: usize) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > min_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_drops_short_lines() {
        let text = "  Name\tAge\tCity  \nabc\n\n  12345 \n123456";
        assert_eq!(normalize_lines(text, 5), vec!["Name\tAge\tCity", "123456"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "first line\r\nsecond line\r\n";
        assert_eq!(normalize_lines(text, 5), vec!["first line", "second line"]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // six chars, twelve bytes
        assert_eq!(normalize_lines("ÅÄÖåäö", 5), vec!["ÅÄÖåäö"]);
        assert!(normalize_lines("ÅÄÖåä", 5).is_empty());
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(normalize_lines("   \n\t\n", 5).is_empty());
    }
}
