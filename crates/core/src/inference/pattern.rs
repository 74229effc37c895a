//! Character-class pattern synthesis from a literal example answer.
//!
//! `AB12` becomes `[A-Z][A-Z][0-9][0-9]` in exact-length mode, or
//! `[A-Z]+[0-9]+` in dynamic-length mode so a short example generalizes to a
//! longer real answer.

use std::fmt;

use regex_lite::Regex;
use tracing::warn;

/// Upper bound on merge passes when collapsing runs. Each pass halves a run,
/// so ten passes cover any realistic example length.
const MAX_COLLAPSE_PASSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
}

impl CharClass {
    pub fn of(c: char) -> Option<Self> {
        match c {
            'A'..='Z' => Some(CharClass::Upper),
            'a'..='z' => Some(CharClass::Lower),
            '0'..='9' => Some(CharClass::Digit),
            _ => None,
        }
    }

    fn as_regex(self) -> &'static str {
        match self {
            CharClass::Upper => "[A-Z]",
            CharClass::Lower => "[a-z]",
            CharClass::Digit => "[0-9]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternToken {
    /// Exactly one character of the class.
    Class(CharClass),
    /// One or more characters of the class.
    Run(CharClass),
    /// A symbol that must appear verbatim.
    Literal(char),
}

/// A search pattern synthesized from one literal example answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidatePattern {
    tokens: Vec<PatternToken>,
}

impl CandidatePattern {
    /// Build a pattern from `example`.
    ///
    /// ASCII punctuation becomes an escaped literal. Whitespace and non-ASCII
    /// characters are skipped, so the pattern only constrains the ASCII part
    /// of the example. With `dynamic_length`, adjacent tokens of the same
    /// class collapse and every class becomes one-or-more.
    pub fn synthesize(example: &str, dynamic_length: bool) -> Self {
        let mut tokens: Vec<PatternToken> = example
            .chars()
            .filter_map(|c| {
                if c.is_ascii_punctuation() {
                    Some(PatternToken::Literal(c))
                } else {
                    CharClass::of(c).map(PatternToken::Class)
                }
            })
            .collect();

        if dynamic_length {
            for _ in 0..MAX_COLLAPSE_PASSES {
                let before = tokens.len();
                tokens = collapse_pass(tokens);
                if tokens.len() == before {
                    break;
                }
            }
            tokens = tokens
                .into_iter()
                .map(|token| match token {
                    PatternToken::Class(class) => PatternToken::Run(class),
                    other => other,
                })
                .collect();
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Regex source for this pattern.
    pub fn to_regex_string(&self) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                PatternToken::Class(class) => class.as_regex().to_string(),
                PatternToken::Run(class) => format!("{}+", class.as_regex()),
                PatternToken::Literal(c) => regex_lite::escape(&c.to_string()),
            })
            .collect()
    }

    /// Compile for searching. `None` for an empty pattern.
    pub fn compile(&self) -> Option<Regex> {
        self.compile_source(self.to_regex_string())
    }

    /// Compile with a required literal suffix after the pattern.
    pub fn compile_with_suffix(&self, suffix: char) -> Option<Regex> {
        let source = format!(
            "{}{}",
            self.to_regex_string(),
            regex_lite::escape(&suffix.to_string())
        );
        self.compile_source(source)
    }

    /// True when `candidate` matches the whole pattern, start to end.
    pub fn matches_exactly(&self, candidate: &str) -> bool {
        self.compile_source(format!("^{}$", self.to_regex_string()))
            .is_some_and(|regex| regex.is_match(candidate))
    }

    /// Number of leading digit tokens when the pattern is digits only and of
    /// exact length (e.g. 8 for a `YYYYMMDD` example).
    pub fn fixed_digit_count(&self) -> Option<usize> {
        let all_digits = !self.tokens.is_empty()
            && self
                .tokens
                .iter()
                .all(|t| *t == PatternToken::Class(CharClass::Digit));
        all_digits.then_some(self.tokens.len())
    }

    fn compile_source(&self, source: String) -> Option<Regex> {
        if self.tokens.is_empty() {
            return None;
        }
        match Regex::new(&source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Synthesized pattern {:?} failed to compile: {}", source, e);
                None
            }
        }
    }
}

impl fmt::Display for CandidatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_regex_string())
    }
}

/// Shorthand for [`CandidatePattern::synthesize`].
pub fn synthesize(example: &str, dynamic_length: bool) -> CandidatePattern {
    CandidatePattern::synthesize(example, dynamic_length)
}

/// Merge non-overlapping adjacent pairs of the same class, left to right.
fn collapse_pass(tokens: Vec<PatternToken>) -> Vec<PatternToken> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        if let PatternToken::Class(_) = token {
            if iter.peek() == Some(&token) {
                iter.next();
            }
        }
        merged.push(token);
    }
    merged
}
