//! Text matching strategies for record assertions.

use std::fmt;

#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    /// Panic with `context` in the message when `actual` does not match.
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{context}: Expected {self}, but got '{actual}'"
        );
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(expected) => write!(f, "'{expected}'"),
            TextMatch::StartsWith(prefix) => write!(f, "text to start with '{prefix}'"),
            TextMatch::Contains(substring) => write!(f, "text to contain '{substring}'"),
        }
    }
}
