//! Placeholder extraction from template bodies.

/// Extract every `{name}` token from a template, left to right.
///
/// Tokens are non-overlapping: each `{` pairs with the next `}` that has at
/// least one character between them. Duplicates are kept; deduplication is
/// the reconciler's concern. Nesting is not interpreted, so a `{` inside a
/// token is captured literally. Never fails; no tokens means an empty vec.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let tail = &rest[open + 1..];
        match tail.find('}') {
            // Empty `{}` is not a token, keep scanning past it.
            Some(0) => rest = &tail[1..],
            Some(close) => {
                placeholders.push(tail[..close].to_string());
                rest = &tail[close + 1..];
            }
            None => break,
        }
    }

    placeholders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order() {
        let found = extract_placeholders("Hi {name}, you are {age}");
        assert_eq!(found, vec!["name", "age"]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(extract_placeholders("no placeholders").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn test_keeps_duplicates() {
        let found = extract_placeholders("{name} and {name} again");
        assert_eq!(found, vec!["name", "name"]);
    }

    #[test]
    fn test_unclosed_brace_ignored() {
        assert!(extract_placeholders("Hi {name").is_empty());
        assert_eq!(extract_placeholders("{a} and {b"), vec!["a"]);
    }

    #[test]
    fn test_empty_braces_skipped() {
        assert_eq!(extract_placeholders("{}{name}"), vec!["name"]);
    }

    #[test]
    fn test_nested_open_brace_captured_literally() {
        // No nesting support: the inner `{` is part of the token text.
        assert_eq!(extract_placeholders("{a{b}"), vec!["a{b"]);
    }

    #[test]
    fn test_adjacent_tokens() {
        assert_eq!(extract_placeholders("{a}{b}{c}"), vec!["a", "b", "c"]);
    }
}
