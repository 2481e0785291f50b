//! Template rendering by placeholder substitution.

use std::collections::BTreeMap;

/// Substitute placeholder values into a template body.
///
/// Each entry in the substitution map replaces the first occurrence of its
/// `{name}` token only. A placeholder that repeats in the template keeps its
/// later occurrences verbatim; this single-pass behavior is intentional and
/// documented in DESIGN.md. Tokens with no substitution entry are left as
/// literal text, never an error (the reconciler is the gate upstream).
pub fn render(template: &str, substitutions: &BTreeMap<String, String>) -> String {
    let mut contents = template.to_string();

    for (name, value) in substitutions {
        let token = format!("{{{name}}}");
        contents = contents.replacen(&token, value, 1);
    }

    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_simple() {
        assert_eq!(render("Hi {name}", &subs(&[("name", "Bo")])), "Hi Bo");
    }

    #[test]
    fn test_render_multiple() {
        let out = render(
            "Hi {name}, you are {age}",
            &subs(&[("name", "Al"), ("age", "9")]),
        );
        assert_eq!(out, "Hi Al, you are 9");
    }

    #[test]
    fn test_rerender_is_noop() {
        let map = subs(&[("name", "Bo")]);
        let once = render("Hi {name}", &map);
        assert_eq!(render(&once, &map), once);
    }

    #[test]
    fn test_repeated_token_first_occurrence_only() {
        let out = render("{name} and {name}", &subs(&[("name", "Bo")]));
        assert_eq!(out, "Bo and {name}");
    }

    #[test]
    fn test_unresolved_token_left_verbatim() {
        assert_eq!(render("Hi {name}", &BTreeMap::new()), "Hi {name}");
    }

    #[test]
    fn test_value_containing_braces_not_rescanned_by_later_keys() {
        // BTreeMap iterates alphabetically: "a" first, then "b".
        let out = render("{a} {b}", &subs(&[("a", "{b}"), ("b", "x")]));
        // The injected "{b}" from a's value is the first "{b}" occurrence.
        assert_eq!(out, "x {b}");
    }
}
