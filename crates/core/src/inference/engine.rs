//! Inference orchestrator.
//!
//! Runs the veto check, the user guess list, the priority rules and finally
//! the generic extractors, in that order. The first non-empty answer list wins.

use tracing::debug;

use super::canonical::{full_to_half, Cues};
use super::config::InferenceConfig;
use super::guess::{merge_guess_lists, parse_guess_list};
use super::hint::HintExtractor;
use super::options::OptionExtractor;
use super::permutation::{has_order_keyword, order_candidates};
use super::rules::{default_rules, detect_veto};
use super::symbols::extract_from_symbols;
use super::traits::AnswerRule;
use super::types::{Inference, QuestionContext, RuleKind};

/// Minimum example length for treating a question as "answer in order".
const MIN_ORDERED_EXAMPLE_CHARS: usize = 3;
const MIN_ORDERED_OPTIONS: usize = 3;

/// Answer inference engine.
///
/// Holds only its configuration; every call is independent, so one engine can
/// be shared across threads.
pub struct AnswerEngine {
    config: InferenceConfig,
    cues: Cues,
    rules: Vec<Box<dyn AnswerRule>>,
    options: OptionExtractor,
    hints: HintExtractor,
    guesses: Vec<String>,
}

impl AnswerEngine {
    /// Create an engine with default config.
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an engine with custom config.
    pub fn with_config(config: InferenceConfig) -> Self {
        let cues = config.cues();
        Self {
            rules: default_rules(),
            options: OptionExtractor::new()
                .with_alphanumeric_filter(config.require_alphanumeric_options),
            hints: HintExtractor::new(cues.clone()),
            guesses: parse_guess_list(&config.user_guess_string),
            cues,
            config,
        }
    }

    /// Append a caller-fetched guess list after the configured one.
    pub fn with_online_guesses(mut self, online: &[String]) -> Self {
        self.guesses = merge_guess_lists(&self.guesses, online);
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Infer candidate answers for `question`.
    ///
    /// `event_datetime` is the displayed performance date (`2025/12/24 19:30`),
    /// used only by date/time questions.
    pub fn infer(&self, question: &str, event_datetime: Option<&str>) -> Inference {
        if let Some(reason) = detect_veto(question) {
            debug!("Abstaining: {}", reason);
            return Inference::vetoed(reason);
        }

        if !self.guesses.is_empty() {
            debug!("Using {} user guess(es)", self.guesses.len());
            return Inference::answered(RuleKind::UserGuess, self.guesses.clone());
        }

        let ctx = QuestionContext::new(question, &self.cues, event_datetime);

        for rule in &self.rules {
            if let Some(answers) = rule.apply(&ctx).filter(|answers| !answers.is_empty()) {
                debug!("Rule {} answered {:?}", rule.kind(), answers);
                return Inference::answered(rule.kind(), answers);
            }
        }

        self.fallback(&ctx)
    }

    /// Shorthand for the answer list alone.
    pub fn answers(&self, question: &str, event_datetime: Option<&str>) -> Vec<String> {
        self.infer(question, event_datetime).answers
    }

    fn fallback(&self, ctx: &QuestionContext<'_>) -> Inference {
        let options = self.options.extract(&ctx.formatted);
        if !options.is_empty() {
            if has_order_keyword(&ctx.formatted) {
                if let Some(ordered) = self.ordered_candidates(ctx, &options.options) {
                    debug!("Expanded {} ordered candidates", ordered.len());
                    return Inference::answered(RuleKind::OrderedOptions, ordered);
                }
            }
            debug!("Multi-option answer: {:?}", options.options);
            return Inference::answered(RuleKind::MultiOption, options.options);
        }

        let hint = self.hints.extract(ctx.raw);
        if !hint.answers.is_empty() {
            debug!("Hint answer: {:?}", hint.answers);
            return Inference::answered(RuleKind::Hint, hint.answers);
        }

        let symbols = extract_from_symbols(&full_to_half(ctx.raw));
        if !symbols.is_empty() {
            debug!("Symbol answer: {:?}", symbols);
            return Inference::answered(RuleKind::Symbol, symbols);
        }

        debug!("No strategy matched");
        Inference::no_match()
    }

    /// Orderings of the options sized by the hint's example answer.
    fn ordered_candidates(&self, ctx: &QuestionContext<'_>, options: &[String]) -> Option<Vec<String>> {
        let example = self.hints.extract(ctx.raw).example_answer;
        let example_len = example.chars().count();
        let option_len = options.first()?.chars().count();
        if example_len < MIN_ORDERED_EXAMPLE_CHARS
            || options.len() < MIN_ORDERED_OPTIONS
            || option_len == 0
        {
            return None;
        }

        let group_size = example_len / option_len;
        let ordered: Vec<String> = order_candidates(options, group_size)
            .take(self.config.max_order_candidates)
            .collect();
        (!ordered.is_empty()).then_some(ordered)
    }
}

impl Default for AnswerEngine {
    fn default() -> Self {
        Self::new()
    }
}
