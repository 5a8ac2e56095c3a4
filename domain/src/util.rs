//! Shared utility functions.

/// Truncate a string to at most `max_chars` characters.
///
/// Returns the prefix and whether anything was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (&s[..end], true),
        None => (s, false),
    }
}

/// Truncate a string to at most `max_bytes` bytes, on a char boundary.
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// File-name form of a subtask title: lower-cased, spaces replaced by `_`.
pub fn normalize_title(title: &str) -> String {
    title.replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), ("hello", true));
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_chars("hi", 10), ("hi", false));
        assert_eq!(truncate_chars("hello", 5), ("hello", false));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s = "あのね";
        assert_eq!(truncate_chars(s, 2), ("あの", true));
        assert_eq!(truncate_chars(s, 3), ("あのね", false));
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_chars("", 10), ("", false));
    }

    #[test]
    fn truncate_bytes_keeps_char_boundaries() {
        assert_eq!(truncate_bytes("hello", 10), "hello");
        assert_eq!(truncate_bytes("hello", 3), "hel");
        // Each kana is 3 bytes
        assert_eq!(truncate_bytes("あのね", 7), "あの");
        assert_eq!(truncate_bytes("あのね", 2), "");
    }

    #[test]
    fn normalize_title_for_file_names() {
        assert_eq!(normalize_title("Suez Crisis 1956"), "suez_crisis_1956");
        assert_eq!(normalize_title("Modern Operations"), "modern_operations");
    }
}
