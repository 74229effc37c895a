//! Keyword selection configuration types.

use serde::{Deserialize, Serialize};

use super::select::SelectionMode;

/// Rows never selected unless configured otherwise.
pub const DEFAULT_KEYWORD_EXCLUDE: &str =
    r#""輪椅","身障","身心","障礙","Restricted View","燈柱遮蔽","視線不完整""#;

/// Automatic selection of one page section (dates or areas).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSelectConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    /// Keyword expression in storage form; empty selects among all rows.
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub mode: SelectionMode,
    /// Select among all rows when no keyword matches.
    #[serde(default)]
    pub fallback: bool,
}

fn default_enable() -> bool {
    true
}

impl Default for AutoSelectConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            keyword: String::new(),
            mode: SelectionMode::default(),
            fallback: false,
        }
    }
}

/// Wall-clock keywords that pause and resume the purchase loop.
///
/// `*_keyword` values are matched against `HH:MM:SS`, `*_keyword_second`
/// values against the seconds field alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub idle_keyword: String,
    #[serde(default)]
    pub resume_keyword: String,
    #[serde(default)]
    pub idle_keyword_second: String,
    #[serde(default)]
    pub resume_keyword_second: String,
}

pub fn default_keyword_exclude() -> String {
    DEFAULT_KEYWORD_EXCLUDE.to_string()
}
