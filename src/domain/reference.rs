use regex::Regex;

use crate::error::{AppError, AppResult};

// Alternatives in priority order: local issue, Jira key, cross-repo issue,
// merge commit. Every form is anchored to the start of the message and the
// engine's leftmost-first alternation decides ties.
const REFERENCE_PATTERN: &str =
    r"(?i)^(?:#\d+|[A-Z]{2,}-\d+|\w+(?:-\w+)?/\w+(?:-\w+)?#\d{1,6}|Merge)";

const MERGE_TOKEN: &str = "Merge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(pub String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the exact token `Merge` exempts the commit; a lowercase `merge`
    /// token falls through to the resolver and fails there.
    pub fn is_merge(&self) -> bool {
        self.0 == MERGE_TOKEN
    }
}

pub struct ReferenceExtractor {
    pattern: Regex,
}

impl ReferenceExtractor {
    pub fn new() -> AppResult<Self> {
        let pattern = Regex::new(REFERENCE_PATTERN)
            .map_err(|err| AppError::Configuration(format!("invalid reference pattern: {err}")))?;
        Ok(Self { pattern })
    }

    pub fn extract(&self, message: &str) -> Option<Token> {
        self.pattern
            .find(message)
            .map(|matched| Token(matched.as_str().to_string()))
    }
}
