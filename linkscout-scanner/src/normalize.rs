use percent_encoding::percent_decode_str;

/// Canonicalizes a URL string into the key used for equality comparison.
///
/// Percent-decodes the whole string, lowercases it, then strips any
/// trailing path separators, so `a%28us%29.pdf`, `A(US).pdf` and
/// `a(us).pdf/` all map to the same key. Keys are only ever compared,
/// never displayed.
pub fn normalize_href(href: &str) -> String {
    let decoded = percent_decode_str(href).decode_utf8_lossy();
    decoded.to_lowercase().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encoded_equals_literal() {
        assert_eq!(
            normalize_href("https://h/a%28us%29"),
            normalize_href("https://h/a(us)")
        );
    }

    #[test]
    fn test_trailing_slash_variants_equal() {
        assert_eq!(
            normalize_href("https://h/a.pdf/"),
            normalize_href("https://h/a.pdf")
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            normalize_href("https://H/A.PDF"),
            normalize_href("https://h/a.pdf")
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://h/a%28us%29.pdf",
            "https://h/A.PDF/",
            "https://h/a.pdf//",
            "https://h/plain.docx",
            "https://h/100%",
        ];
        for input in inputs {
            let once = normalize_href(input);
            assert_eq!(normalize_href(&once), once, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_strips_all_trailing_slashes() {
        assert_eq!(normalize_href("https://h/a//"), "https://h/a");
        assert_eq!(
            normalize_href("https://h/a.pdf//"),
            normalize_href("https://h/a.pdf")
        );
    }

    #[test]
    fn test_invalid_percent_sequence_passes_through() {
        assert_eq!(normalize_href("https://h/100%"), "https://h/100%");
    }
}
