use thiserror::Error;

/// Rejected navigation tables.
///
/// Tables are static configuration; these surface at construction so a bad
/// table never reaches classification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("rule table is empty")]
    NoRules,

    #[error("last rule must be an unconditional catch-all")]
    MissingCatchAll,

    #[error("rule #{rule_index} targets undeclared section '{section}'")]
    UnknownSection { rule_index: usize, section: String },

    #[error("section '{0}' is declared more than once")]
    DuplicateSection(String),

    #[error("invalid item name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
