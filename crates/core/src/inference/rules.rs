//! Priority rules evaluated before the generic extractors.
//!
//! Each rule recognizes one narrow question shape and extracts the answer
//! directly. They run in the order returned by [`default_rules`].

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::canonical::{full_to_half, is_numeral_text, normalize_numerals};
use super::event_time::{EventDateRule, EventTimeRule};
use super::traits::AnswerRule;
use super::types::{QuestionContext, RuleKind, VetoReason};

/// Short single-line instructions only; longer text is left to the extractors.
const SHORT_INSTRUCTION_CHARS: usize = 30;

const AGREEMENT_MARKERS: &[&str] = &["同意", "agree"];

const TEXT_KEYWORDS: &[&str] = &["輸入", "括號", "文字"];
const TRANSFORM_KEYWORDS: &[&str] = &["轉換", "數字", "文字"];
const INSTRUCTION_CONTAINERS: &[&str] = &["括號", "引號", "框"];

const TWO_PART_MARKERS: &[(&str, &str)] = &[("第一題", "第二題"), ("第1題", "第2題")];
const TWO_QUESTION_CUES: &[&str] = &[
    "2 questions",
    "two questions",
    "兩題",
    "二題",
    "2題",
    "兩個問題",
];

static AGREEMENT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:輸入|enter|type)\s*["“「【]([^"”」】]{1,16})["”」】]"#)
        .expect("static agreement pattern")
});

static CORNER_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[「『]([^「」『』]+)[」』]").expect("static quote pattern"));

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"【([^【】]+)】").expect("static bracket pattern"));

static ANS_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(\s*ans(?:wer)?\s*:\s*([^)]+)\)").expect("static answer suffix pattern")
});

/// The priority rules in evaluation order.
pub fn default_rules() -> Vec<Box<dyn AnswerRule>> {
    vec![
        Box::new(AgreementRule),
        Box::new(QuotedTextRule),
        Box::new(BracketedTextRule),
        Box::new(BracketedTransformRule),
        Box::new(BracketedInstructionRule),
        Box::new(EventDateRule),
        Box::new(EventTimeRule),
        Box::new(EventNameRule),
    ]
}

/// Detect a question that asks two things at once.
pub fn detect_veto(text: &str) -> Option<VetoReason> {
    let text = full_to_half(text);
    let numbered = TWO_PART_MARKERS
        .iter()
        .any(|(first, second)| text.contains(first) && text.contains(second));

    let upper = text.to_uppercase();
    let lower = text.to_lowercase();
    let labelled = upper.contains("Q1")
        && upper.contains("Q2")
        && TWO_QUESTION_CUES.iter().any(|cue| lower.contains(cue));

    if numbered || labelled {
        debug!("Two-part question detected");
        Some(VetoReason::TwoPartQuestion)
    } else {
        None
    }
}

fn contains_all(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().all(|k| text.contains(k))
}

fn is_short_instruction(ctx: &QuestionContext<'_>) -> bool {
    ctx.canonical.chars().count() < SHORT_INSTRUCTION_CHARS
        && !ctx.canonical.contains('\n')
        && !ctx.formatted.contains(ctx.cues.example.as_str())
}

fn first_bracketed(text: &str) -> Option<&str> {
    BRACKETED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|content| !content.is_empty())
}

fn single(answer: impl Into<String>) -> Option<Vec<String>> {
    let answer = answer.into();
    (!answer.is_empty()).then(|| vec![answer])
}

/// "I agree, please type "YES"" style confirmations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgreementRule;

impl AnswerRule for AgreementRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Agreement
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        let text = full_to_half(ctx.raw);
        let lower = text.to_lowercase();
        if !AGREEMENT_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return None;
        }
        let caps = AGREEMENT_TOKEN.captures(&text)?;
        single(caps.get(1)?.as_str().trim())
    }
}

/// "Type the text inside the quotation marks 「...」".
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedTextRule;

impl AnswerRule for QuotedTextRule {
    fn kind(&self) -> RuleKind {
        RuleKind::QuotedText
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        let text = full_to_half(ctx.raw);
        if !text.contains("輸入") || !text.contains("引號") {
            return None;
        }
        let content = CORNER_QUOTED
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|content| !content.is_empty())?;
        single(content)
    }
}

/// Short "type the text in the brackets 【...】" instruction.
///
/// Numeral content is rewritten as Arabic digits when the question asks for
/// numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedTextRule;

impl AnswerRule for BracketedTextRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BracketedText
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        if !is_short_instruction(ctx) || !contains_all(&ctx.canonical, TEXT_KEYWORDS) {
            return None;
        }
        let content = first_bracketed(&ctx.canonical)?;
        if ctx.canonical.contains("數字") && is_numeral_text(content) {
            single(normalize_numerals(content))
        } else {
            single(content)
        }
    }
}

/// Short "transform the text in the brackets into digits" instruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedTransformRule;

impl AnswerRule for BracketedTransformRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BracketedTransform
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        if !is_short_instruction(ctx) || !contains_all(&ctx.canonical, TRANSFORM_KEYWORDS) {
            return None;
        }
        let content = first_bracketed(&ctx.canonical)?;
        single(normalize_numerals(content))
    }
}

/// Laxer instruction: any length, one bracketed group, an input verb and a
/// container word.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedInstructionRule;

impl AnswerRule for BracketedInstructionRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BracketedInstruction
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        let canonical = &ctx.canonical;
        if !canonical.contains("輸入")
            || !INSTRUCTION_CONTAINERS.iter().any(|c| canonical.contains(c))
            || ctx.formatted.contains(ctx.cues.example.as_str())
        {
            return None;
        }
        let mut groups = BRACKETED.captures_iter(canonical);
        let only = groups.next()?.get(1)?.as_str().trim().to_string();
        if groups.next().is_some() {
            return None;
        }
        single(only)
    }
}

/// English "What is the name of ... (ans: ...)" pages that print the answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventNameRule;

impl AnswerRule for EventNameRule {
    fn kind(&self) -> RuleKind {
        RuleKind::EventName
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        let text = full_to_half(ctx.raw);
        if !text.to_lowercase().contains("name of") {
            return None;
        }
        let caps = ANS_SUFFIX.captures(&text)?;
        single(caps.get(1)?.as_str().trim())
    }
}
