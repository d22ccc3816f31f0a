//! Glob patterns matched against certificate fields.

use std::fmt;
use std::fmt::{Display, Formatter};

const LABEL_SEPARATOR: char = '.';

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Token {
    Literal(char),
    // `?`
    AnyChar,
    // `*`
    AnyRun,
}

/// A pattern a certificate field value must match.
///
/// The grammar is a case-sensitive DNS-style glob:
///
/// * `*` matches zero or more characters, none of which is a `.`
/// * `?` matches exactly one character that is not a `.`
/// * any other character matches itself
///
/// Wildcards never cross a DNS label boundary, so `*.example.com` matches
/// `api.example.com` but not `a.b.example.com`. There is no escape syntax: every
/// string is a valid pattern and matching never fails.
///
/// Two patterns are equal when their source strings are equal.
///
/// # Examples
///
/// ```
/// use transport_security::CredentialMatchPattern;
///
/// let pattern = CredentialMatchPattern::new("*.example.com");
/// assert!(pattern.matches("api.example.com"));
/// assert!(!pattern.matches("a.b.example.com"));
/// assert!(!pattern.matches("example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct CredentialMatchPattern {
    source: String,
    tokens: Vec<Token>,
}

impl CredentialMatchPattern {
    /// Compiles the given glob.
    pub fn new(pattern: &str) -> Self {
        let tokens = pattern
            .chars()
            .map(|c| match c {
                '*' => Token::AnyRun,
                '?' => Token::AnyChar,
                c => Token::Literal(c),
            })
            .collect();

        Self {
            source: pattern.to_string(),
            tokens,
        }
    }

    /// Returns the pattern as it was written in the config.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the whole `value` matches this pattern.
    pub fn matches(&self, value: &str) -> bool {
        // reachable[i] is true when the first i tokens can match the value prefix consumed so far.
        let mut reachable = vec![false; self.tokens.len() + 1];
        reachable[0] = true;
        self.extend_through_runs(&mut reachable);
        let mut next = vec![false; self.tokens.len() + 1];

        for c in value.chars() {
            next.fill(false);
            for (i, token) in self.tokens.iter().enumerate() {
                if !reachable[i] {
                    continue;
                }
                match *token {
                    Token::Literal(l) if l == c => next[i + 1] = true,
                    Token::AnyChar if c != LABEL_SEPARATOR => next[i + 1] = true,
                    // the run stays open and consumes `c`
                    Token::AnyRun if c != LABEL_SEPARATOR => next[i] = true,
                    _ => {}
                }
            }
            self.extend_through_runs(&mut next);

            if !next.iter().any(|r| *r) {
                return false;
            }
            std::mem::swap(&mut reachable, &mut next);
        }

        reachable[self.tokens.len()]
    }

    // A `*` may match the empty string, so any state sitting before a run also reaches past it.
    fn extend_through_runs(&self, reachable: &mut [bool]) {
        for (i, token) in self.tokens.iter().enumerate() {
            if reachable[i] && *token == Token::AnyRun {
                reachable[i + 1] = true;
            }
        }
    }
}

impl PartialEq for CredentialMatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CredentialMatchPattern {}

impl Display for CredentialMatchPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl From<&str> for CredentialMatchPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for CredentialMatchPattern {
    fn from(pattern: String) -> Self {
        Self::new(&pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! pattern_match_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (pattern, value, expected) = $value;
                assert_eq!(
                    CredentialMatchPattern::new(pattern).matches(value),
                    expected,
                    "pattern '{}' against '{}'",
                    pattern,
                    value
                );
            }
        )*
        }
    }

    pattern_match_tests! {
        exact_match: ("hello.world", "hello.world", true),
        exact_mismatch: ("hello.world", "hello.worlds", false),
        exact_is_case_sensitive: ("hello.world", "Hello.World", false),
        prefix_is_not_a_match: ("hello", "hello.world", false),
        empty_pattern_matches_empty_value: ("", "", true),
        empty_pattern_rejects_value: ("", "a", false),
        star_matches_label: ("*.example.com", "api.example.com", true),
        star_does_not_cross_dot: ("*.example.com", "a.b.example.com", false),
        star_needs_separator: ("*.example.com", "example.com", false),
        star_matches_empty: ("api*.example.com", "api.example.com", true),
        star_inside_label: ("api-*-eu.example.com", "api-7-eu.example.com", true),
        star_alone_rejects_dotted: ("*", "foo.bar", false),
        star_alone_matches_label: ("*", "foobar", true),
        star_alone_matches_empty: ("*", "", true),
        multiple_stars: ("*.*.example.com", "a.b.example.com", true),
        adjacent_stars: ("**", "abc", true),
        question_matches_one: ("host?.example.com", "host1.example.com", true),
        question_needs_exactly_one: ("host?.example.com", "host.example.com", false),
        question_rejects_dot: ("a?b", "a.b", false),
        question_with_star: ("?*", "", false),
        star_backtracks: ("*ab", "aab", true),
        literal_dot_matches_dot: ("a.b", "a.b", true),
        unicode_literals: ("bjørn.*", "bjørn.no", true),
        unicode_question: ("bj?rn", "bjørn", true),
    }

    #[test]
    fn test_pathological_pattern_completes() {
        let pattern = CredentialMatchPattern::new(&"*a".repeat(64));
        let value = "a".repeat(256) + "b";
        assert!(!pattern.matches(&value));
    }

    #[test]
    fn test_states_do_not_carry_over_between_chars() {
        let pattern = CredentialMatchPattern::new("a?c*.d");
        assert!(pattern.matches("abcxyz.d"));
        assert!(pattern.matches("abc.d"));
        assert!(!pattern.matches("abcc"));
        assert!(!pattern.matches("ac.d"));
        assert!(!pattern.matches("abcx.d.d"));

        let long_label = "x".repeat(512);
        assert!(pattern.matches(&format!("abc{}.d", long_label)));
        assert!(!pattern.matches(&format!("abc{}.e", long_label)));
    }

    #[test]
    fn test_equality_uses_source() {
        assert_eq!(
            CredentialMatchPattern::new("*.example.com"),
            CredentialMatchPattern::from("*.example.com")
        );
        assert_ne!(
            CredentialMatchPattern::new("*.example.com"),
            CredentialMatchPattern::new("?.example.com")
        );
    }

    #[test]
    fn test_to_string() {
        let pattern = CredentialMatchPattern::from(String::from("node?.*.local"));
        assert_eq!(pattern.to_string(), "node?.*.local");
        assert_eq!(pattern.as_str(), "node?.*.local");
    }
}
