//! Placeholder scanner for `{{identifier}}` syntax
//!
//! The grammar is fixed: `{{`, then a non-empty run of characters other than
//! `}`, then `}}`. Delimiters do not nest and the first `}}` closes the
//! placeholder. Unterminated placeholders are not errors, they simply do not
//! match. Names are taken verbatim; surrounding whitespace is significant.

use std::ops::Range;

use strand_domain::{HIDDEN, placeholder_for};

const OPEN: &str = "{{";
const CLOSE: char = '}';

/// A placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The identifier between the braces.
    pub name: &'a str,

    /// Byte range of the whole `{{name}}` in the scanned string.
    pub span: Range<usize>,
}

/// Lazy iterator over the placeholders of a string, left to right.
///
/// Finite and cheap to recreate: call [`scan`] again to start over.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            let Some(open) = self.input[self.pos..].find(OPEN) else {
                self.pos = self.input.len();
                return None;
            };
            let start = self.pos + open;
            let name_start = start + OPEN.len();

            let Some(close) = self.input[name_start..].find(CLOSE) else {
                self.pos = self.input.len();
                return None;
            };
            let name_end = name_start + close;

            if close > 0 && self.input[name_end + 1..].starts_with(CLOSE) {
                let end = name_end + 2;
                self.pos = end;
                return Some(Placeholder {
                    name: &self.input[name_start..name_end],
                    span: start..end,
                });
            }

            // `{{}}` or `{{a}b`: no match here, retry one byte further on.
            self.pos = start + 1;
        }
        None
    }
}

/// Scans a string for placeholders.
///
/// # Examples
///
/// ```
/// use strand_application::variable_resolver::parser::scan;
///
/// let names: Vec<_> = scan("Hi {{name}}, {{name}}!").map(|p| p.name).collect();
/// assert_eq!(names, vec!["name", "name"]);
/// ```
#[must_use]
pub const fn scan(input: &str) -> Placeholders<'_> {
    Placeholders { input, pos: 0 }
}

/// Extracts just the placeholder names, duplicates included.
#[must_use]
pub fn placeholder_names(input: &str) -> Vec<&str> {
    scan(input).map(|p| p.name).collect()
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    scan(input).next().is_some()
}

/// Returns true if `text` contains the literal `{{name}}`.
#[must_use]
pub fn contains_placeholder(text: &str, name: &str) -> bool {
    text.contains(&placeholder_for(name))
}

/// Validates an identifier for use inside `{{...}}`.
///
/// Any non-blank run of characters without `}` or `{{` is accepted, except
/// the reserved `Hidden` sentinel.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(CLOSE) && !name.contains(OPEN) && name != HIDDEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_simple_placeholder() {
        let found: Vec<_> = scan("{{name}}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "name");
        assert_eq!(found[0].span, 0..8);
    }

    #[test]
    fn test_scan_keeps_duplicates_in_order() {
        assert_eq!(placeholder_names("{{b}} {{a}} {{b}}"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(placeholder_names("{{a}}{{b}}{{c}}"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_is_part_of_name() {
        assert_eq!(placeholder_names("{{ name }}"), vec![" name "]);
    }

    #[test]
    fn test_unclosed_placeholder() {
        assert!(placeholder_names("{{name").is_empty());
        assert!(placeholder_names("Hello {{name} there").is_empty());
    }

    #[test]
    fn test_empty_placeholder() {
        assert!(placeholder_names("{{}}").is_empty());
    }

    #[test]
    fn test_single_brace_is_not_a_placeholder() {
        assert!(placeholder_names("{name}").is_empty());
    }

    #[test]
    fn test_first_close_wins() {
        assert_eq!(placeholder_names("{{a}}}"), vec!["a"]);
    }

    #[test]
    fn test_stray_brace_inside_aborts_that_match_only() {
        assert_eq!(placeholder_names("{{a}b}} {{c}}"), vec!["c"]);
    }

    #[test]
    fn test_opening_braces_are_not_nested() {
        assert_eq!(placeholder_names("{{{a}}"), vec!["{a"]);
        assert_eq!(placeholder_names("{{x{{a}}"), vec!["x{{a"]);
    }

    #[test]
    fn test_non_ascii_names_and_spans() {
        let input = "héllo {{naïve}} ✓";
        let found: Vec<_> = scan(input).collect();
        assert_eq!(found[0].name, "naïve");
        assert_eq!(&input[found[0].span.clone()], "{{naïve}}");
    }

    #[test]
    fn test_scan_is_restartable() {
        let input = "{{a}} {{b}}";
        assert_eq!(scan(input).count(), 2);
        assert_eq!(scan(input).count(), 2);
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("Hello {{name}}!"));
        assert!(!has_placeholders("Hello World!"));
        assert!(!has_placeholders("{{incomplete"));
        assert!(!has_placeholders("}}{{"));
    }

    #[test]
    fn test_contains_placeholder_is_exact() {
        assert!(contains_placeholder("Hi {{name}}", "name"));
        assert!(!contains_placeholder("Hi {{names}}", "name"));
        assert!(!contains_placeholder("Hi {{first_name}}", "name"));
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("name"));
        assert!(is_valid_identifier("Greeting 2"));
        assert!(is_valid_identifier("a1b2c3"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("   "));
        assert!(!is_valid_identifier("a}b"));
        assert!(!is_valid_identifier("a{{b"));
        assert!(!is_valid_identifier("Hidden"));
    }
}
