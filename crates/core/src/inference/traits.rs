//! Traits for inference components.

use super::types::{QuestionContext, RuleKind};

/// A priority rule that may answer a question directly.
///
/// Rules are evaluated in a fixed order; the first one returning a non-empty
/// list wins. Returning `None` (or an empty list) passes to the next rule.
pub trait AnswerRule: Send + Sync {
    /// Which rule this is, for logging and the inference outcome.
    fn kind(&self) -> RuleKind;

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>>;
}
