//! Keyword expression grammar.
//!
//! An expression is a comma-joined list of double-quoted terms, OR-ed
//! together. A term holding spaces is split into parts that must all appear
//! in the row text. Matching is plain substring comparison after removing
//! full-width spaces.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use super::format::{quote_item, to_storage, KEYWORD_DELIMITER};

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Errors from parsing keyword configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordError {
    #[error("Malformed keyword expression {0:?}: {1}")]
    Malformed(String, String),

    #[error("Unknown selection mode: {0:?}")]
    UnknownMode(String),
}

fn strip_ideographic_space(text: &str) -> String {
    text.replace(IDEOGRAPHIC_SPACE, "")
}

/// One OR-branch: every part must be a substring of the row text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordTerm {
    parts: Vec<String>,
}

impl KeywordTerm {
    pub fn new(term: &str) -> Self {
        let parts = strip_ideographic_space(term)
            .split(' ')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// An empty term matches any text.
    pub fn matches(&self, text: &str) -> bool {
        let text = strip_ideographic_space(text);
        self.parts.iter().all(|part| text.contains(part.as_str()))
    }
}

impl fmt::Display for KeywordTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(" "))
    }
}

/// Parsed keyword expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordExpression {
    terms: Vec<KeywordTerm>,
}

impl KeywordExpression {
    /// Parse an expression.
    ///
    /// Quoted input is parsed as a JSON array body. Unquoted input is treated
    /// as display form (`A B;C`) and quoted first, so a bare `VIP` parses as
    /// one term. Blank input is the empty expression.
    pub fn parse(expression: &str) -> Result<Self, KeywordError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let storage = if trimmed.contains('"') {
            trimmed.to_string()
        } else if trimmed.contains(KEYWORD_DELIMITER) {
            to_storage(trimmed)
        } else {
            quote_item(trimmed)
        };

        let items: Vec<String> = serde_json::from_str(&format!("[{}]", storage))
            .map_err(|e| KeywordError::Malformed(expression.to_string(), e.to_string()))?;

        Ok(Self {
            terms: items.iter().map(|item| KeywordTerm::new(item)).collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[KeywordTerm] {
        &self.terms
    }

    /// True when any term matches. The empty expression matches everything.
    pub fn matches(&self, text: &str) -> bool {
        self.terms.is_empty() || self.terms.iter().any(|term| term.matches(text))
    }
}

impl FromStr for KeywordExpression {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Match `text` against an expression string.
///
/// A malformed expression is logged and matches everything.
pub fn is_match(expression: &str, text: &str) -> bool {
    match KeywordExpression::parse(expression) {
        Ok(parsed) => parsed.matches(text),
        Err(e) => {
            warn!("{}; matching every row", e);
            true
        }
    }
}
