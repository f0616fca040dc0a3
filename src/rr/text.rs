/// Whether every double quote inside TXT-like content is escaped.
///
/// Content without quotes is accepted as is. When the content is wrapped in
/// quotes, the wrapping pair is ignored but its closing quote must not itself
/// be escaped. A quote counts as escaped when an odd number of backslashes
/// precede it.
pub fn is_properly_quoted(text: &str) -> bool {
    let (inner, wrapped) = match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => (inner, true),
        None => (text, false),
    };

    let mut backslashes = 0usize;
    for c in inner.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' if backslashes % 2 == 0 => return false,
            _ => backslashes = 0,
        }
    }

    !wrapped || backslashes % 2 == 0
}

/// Whether content is enclosed in double quotes. Empty content passes.
pub fn has_quotes_around(text: &str) -> bool {
    text.is_empty() || (text.len() >= 2 && text.starts_with('"') && text.ends_with('"'))
}

/// Case-sensitive suffix test on whole characters.
///
/// An empty `needle` matches every haystack, including an empty one.
pub fn ends_with(needle: &str, haystack: &str) -> bool {
    haystack.ends_with(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properly_quoted() {
        assert!(is_properly_quoted(""));
        assert!(is_properly_quoted("v=spf1 -all"));
        assert!(is_properly_quoted(r#""v=spf1 -all""#));
        assert!(is_properly_quoted(r#""say \"hi\"""#));
        assert!(is_properly_quoted(r#""""#));
        assert!(is_properly_quoted(r#""trailing backslash \\""#));
    }

    #[test]
    fn test_improperly_quoted() {
        assert!(!is_properly_quoted(r#"""#));
        assert!(!is_properly_quoted(r#""unterminated"#));
        assert!(!is_properly_quoted(r#"unopened""#));
        assert!(!is_properly_quoted(r#""say "hi"""#));
        assert!(!is_properly_quoted(r#""double \\"escape""#));
        assert!(!is_properly_quoted(r#""escaped close\""#));
    }

    #[test]
    fn test_properly_quoted_is_stable() {
        for text in ["", "plain", r#""a \"b\" c""#, r#""x""#] {
            assert!(is_properly_quoted(text));
            assert!(is_properly_quoted(text), "{text}");
        }
    }

    #[test]
    fn test_has_quotes_around() {
        assert!(has_quotes_around(""));
        assert!(has_quotes_around(r#""text""#));
        assert!(!has_quotes_around(r#"""#));
        assert!(!has_quotes_around("text"));
        assert!(!has_quotes_around(r#""text"#));
    }

    #[test]
    fn test_ends_with() {
        assert!(ends_with("", ""));
        assert!(ends_with("", "example.com"));
        assert!(!ends_with("com", ""));
        assert!(ends_with("com", "example.com"));
        assert!(!ends_with("COM", "example.com"));
        assert!(ends_with("中国", "example.中国"));
        assert!(!ends_with("国.", "example.中国"));
        assert!(!ends_with("longer.example.com", "example.com"));
    }
}
