//! Answer inference for ticket-page verification questions.
//!
//! Pure heuristics over the question text. Nothing here performs I/O; the
//! displayed event date is passed in by the caller.
//!
//! # Pipeline
//!
//! ```text
//! question ──► veto? ──► user guesses ──► priority rules ──► fallback
//!                                         agreement          options (+ ordering)
//!                                         quoted / bracketed hint
//!                                         event date / time  symbols
//!                                         event name
//! ```
//!
//! The first stage producing a non-empty list wins. An empty list means the
//! engine abstains; [`InferenceOutcome`] tells a veto apart from no match.

pub mod canonical;
pub mod config;
pub mod engine;
pub mod event_time;
pub mod guess;
pub mod hint;
pub mod keep_symbols;
pub mod options;
pub mod pattern;
pub mod permutation;
pub mod rules;
pub mod symbols;
pub mod traits;
pub mod types;

pub use canonical::{canonicalize, format_question, full_to_half, normalize_numerals, Cues};
pub use config::InferenceConfig;
pub use engine::AnswerEngine;
pub use event_time::{parse_event_datetime, EventDateRule, EventMoment, EventTimeRule};
pub use guess::{merge_guess_lists, parse_guess_list};
pub use hint::{extract_from_hint, HintExtraction, HintExtractor};
pub use keep_symbols::must_keep_symbols;
pub use options::{extract_options, OptionDelimiter, OptionExtractor, OptionList};
pub use pattern::{synthesize, CandidatePattern, CharClass, PatternToken};
pub use permutation::{expand_order_candidates, has_order_keyword, order_candidates, Permutations};
pub use rules::{
    default_rules, detect_veto, AgreementRule, BracketedInstructionRule, BracketedTextRule,
    BracketedTransformRule, EventNameRule, QuotedTextRule,
};
pub use symbols::extract_from_symbols;
pub use traits::AnswerRule;
pub use types::{Inference, InferenceOutcome, QuestionContext, RuleKind, VetoReason};
