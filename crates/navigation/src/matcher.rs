use regex::Regex;

use crate::error::NavigationError;

/// How a rule recognises navigation item names.
#[derive(Debug, Clone)]
pub enum NameMatcher {
    /// Case-sensitive equality.
    Exact(String),
    Pattern(Regex),
    /// Matches every name; the required shape of the last rule.
    Any,
}

impl NameMatcher {
    pub fn exact(name: impl Into<String>) -> Self {
        NameMatcher::Exact(name.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self, NavigationError> {
        Regex::new(pattern)
            .map(NameMatcher::Pattern)
            .map_err(|source| NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Exact(expected) => expected == name,
            NameMatcher::Pattern(re) => re.is_match(name),
            NameMatcher::Any => true,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, NameMatcher::Any)
    }
}
