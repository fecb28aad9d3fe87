//! Anchored path patterns and ordered role tables
//!
//! A [`PatternTable`] maps paths to structural roles. Entries are tested in insertion order
//! and the first match wins, so tables are built from the most specific pattern to the least
//! specific one.
//!
//! Some roles are "anything below X except ..." patterns. The regex engine has no
//! look-around, so such a pattern captures the tail after its prefix and rejects the match
//! when any tail segment is one of the excluded names.

use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};

const TAIL: &str = "tail";

#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    excluded: Vec<String>,
}

impl PathPattern {
    /// Pattern matching the whole path against `pattern`
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Self::build(&format!("^(?:{pattern})$"), Vec::new(), false)
    }

    /// Case-insensitive variant of [`PathPattern::new`]
    pub fn case_insensitive(pattern: &str) -> Result<Self, ConfigError> {
        Self::build(&format!("^(?:{pattern})$"), Vec::new(), true)
    }

    /// Pattern matching `prefix` followed by a non-empty tail with none of the `excluded`
    /// segments.
    pub fn with_tail(prefix: &str, excluded: &[&str]) -> Result<Self, ConfigError> {
        let excluded = excluded.iter().map(|name| name.to_string()).collect();
        Self::build(&format!("^(?:{prefix})/(?P<{TAIL}>.+)$"), excluded, false)
    }

    fn build(pattern: &str, excluded: Vec<String>, case_insensitive: bool) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|err| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self { regex, excluded })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        if self.excluded.is_empty() {
            return self.regex.is_match(path);
        }
        let Some(captures) = self.regex.captures(path) else {
            return false;
        };
        match captures.name(TAIL) {
            Some(tail) => !tail
                .as_str()
                .split('/')
                .any(|segment| self.excluded.iter().any(|name| name == segment)),
            None => true,
        }
    }
}

/// Ordered `(pattern, role)` table; the first matching entry decides.
#[derive(Debug, Clone)]
pub struct PatternTable<R> {
    entries: Vec<(PathPattern, R)>,
}

impl<R: Copy> PatternTable<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, pattern: PathPattern, role: R) {
        self.entries.push((pattern, role));
    }

    /// Role of the first pattern matching `path`
    pub fn classify(&self, path: &str) -> Option<R> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.is_match(path))
            .map(|(_, role)| *role)
    }

    /// Every role whose pattern matches `path`, in priority order
    pub fn candidates(&self, path: &str) -> Vec<R> {
        self.entries
            .iter()
            .filter(|(pattern, _)| pattern.is_match(path))
            .map(|(_, role)| *role)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Copy> Default for PatternTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_anchored() {
        let pattern = PathPattern::new("list/indent").unwrap();
        assert!(pattern.is_match("list/indent"));
        assert!(!pattern.is_match("list/indent/num"));
        assert!(!pattern.is_match("body/list/indent"));
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = PathPattern::case_insensitive("table(?:/tbody)?/tr").unwrap();
        assert!(pattern.is_match("TABLE/tr"));
        assert!(pattern.is_match("table/TBODY/tr"));
        assert!(!PathPattern::new("table").unwrap().is_match("TABLE"));
    }

    #[test]
    fn test_tail_exclusion_is_segment_wise() {
        let pattern = PathPattern::with_tail("list/indent", &["text", "num", "alinea", "content"]).unwrap();
        assert!(pattern.is_match("list/indent/list"));
        assert!(pattern.is_match("list/indent/list/indent"));
        assert!(pattern.is_match("list/indent/contents"));
        assert!(!pattern.is_match("list/indent/num"));
        assert!(!pattern.is_match("list/indent/list/text"));
        assert!(!pattern.is_match("list/indent"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let error = PathPattern::new("list/(indent").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidPattern { .. }));
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Role {
        Specific,
        General,
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = PatternTable::new();
        table.push(PathPattern::new("root/content/mp").unwrap(), Role::Specific);
        table.push(PathPattern::with_tail("root", &[]).unwrap(), Role::General);

        assert_eq!(table.classify("root/content/mp"), Some(Role::Specific));
        assert_eq!(
            table.candidates("root/content/mp"),
            vec![Role::Specific, Role::General]
        );
        assert_eq!(table.classify("root/other"), Some(Role::General));
        assert_eq!(table.classify("elsewhere"), None);
    }
}
