//! Shared types for answer inference.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::canonical::{canonicalize, format_question, Cues};
use super::event_time::{parse_event_datetime, EventMoment};

/// Which strategy produced an answer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    UserGuess,
    Agreement,
    QuotedText,
    BracketedText,
    BracketedTransform,
    BracketedInstruction,
    EventDate,
    EventTime,
    EventName,
    MultiOption,
    OrderedOptions,
    Hint,
    Symbol,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::UserGuess => "user_guess",
            RuleKind::Agreement => "agreement",
            RuleKind::QuotedText => "quoted_text",
            RuleKind::BracketedText => "bracketed_text",
            RuleKind::BracketedTransform => "bracketed_transform",
            RuleKind::BracketedInstruction => "bracketed_instruction",
            RuleKind::EventDate => "event_date",
            RuleKind::EventTime => "event_time",
            RuleKind::EventName => "event_name",
            RuleKind::MultiOption => "multi_option",
            RuleKind::OrderedOptions => "ordered_options",
            RuleKind::Hint => "hint",
            RuleKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural reason for refusing to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoReason {
    /// The text asks two separate questions at once.
    TwoPartQuestion,
}

impl fmt::Display for VetoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VetoReason::TwoPartQuestion => f.write_str("two_part_question"),
        }
    }
}

/// How an inference ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InferenceOutcome {
    Answered { rule: RuleKind },
    Vetoed { reason: VetoReason },
    NoMatch,
}

/// Answer list plus the outcome that produced it.
///
/// `answers` is empty unless the outcome is `Answered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inference {
    pub answers: Vec<String>,
    pub outcome: InferenceOutcome,
}

impl Inference {
    pub fn answered(rule: RuleKind, answers: Vec<String>) -> Self {
        Self {
            answers,
            outcome: InferenceOutcome::Answered { rule },
        }
    }

    pub fn vetoed(reason: VetoReason) -> Self {
        Self {
            answers: Vec::new(),
            outcome: InferenceOutcome::Vetoed { reason },
        }
    }

    pub fn no_match() -> Self {
        Self {
            answers: Vec::new(),
            outcome: InferenceOutcome::NoMatch,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.outcome, InferenceOutcome::Answered { .. })
    }

    pub fn rule(&self) -> Option<RuleKind> {
        match self.outcome {
            InferenceOutcome::Answered { rule } => Some(rule),
            _ => None,
        }
    }
}

/// One question, prepared once and shared by every rule.
#[derive(Debug, Clone)]
pub struct QuestionContext<'a> {
    /// Text as scraped.
    pub raw: &'a str,
    /// Canonical form: brackets unified, stop words stripped, synonyms folded.
    pub canonical: String,
    /// Cue-marked form with bracket glyphs preserved.
    pub formatted: String,
    /// Displayed event date/time, when the caller supplied a parseable one.
    pub event: Option<EventMoment>,
    pub cues: &'a Cues,
}

impl<'a> QuestionContext<'a> {
    pub fn new(raw: &'a str, cues: &'a Cues, event_datetime: Option<&str>) -> Self {
        Self {
            raw,
            canonical: canonicalize(raw),
            formatted: format_question(raw, cues),
            event: event_datetime.and_then(parse_event_datetime),
            cues,
        }
    }
}
