//! Answer inference configuration types.

use serde::{Deserialize, Serialize};

use super::canonical::Cues;

/// Inference configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Marker that "example" phrases are rewritten onto.
    #[serde(default = "default_example_cue")]
    pub example_cue: String,
    /// Marker that "please fill in" phrases are rewritten onto.
    #[serde(default = "default_input_cue")]
    pub input_cue: String,
    /// Cap on the number of ordered candidates produced for one question.
    #[serde(default = "default_max_order_candidates")]
    pub max_order_candidates: usize,
    /// Keep an option list only when at least three entries are alphanumeric.
    #[serde(default = "default_require_alphanumeric_options")]
    pub require_alphanumeric_options: bool,
    /// Answers to try first, in storage form (`"A","B"`).
    #[serde(default)]
    pub user_guess_string: String,
}

fn default_example_cue() -> String {
    "範例".to_string()
}

fn default_input_cue() -> String {
    "輸入".to_string()
}

fn default_max_order_candidates() -> usize {
    120
}

fn default_require_alphanumeric_options() -> bool {
    true
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            example_cue: default_example_cue(),
            input_cue: default_input_cue(),
            max_order_candidates: default_max_order_candidates(),
            require_alphanumeric_options: default_require_alphanumeric_options(),
            user_guess_string: String::new(),
        }
    }
}

impl InferenceConfig {
    pub fn cues(&self) -> Cues {
        Cues {
            example: self.example_cue.clone(),
            input: self.input_cue.clone(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.example_cue.trim().is_empty() {
            return Err("example_cue must not be empty".to_string());
        }
        if self.input_cue.trim().is_empty() {
            return Err("input_cue must not be empty".to_string());
        }
        if self.example_cue == self.input_cue {
            return Err(format!(
                "example_cue and input_cue must differ, both are {:?}",
                self.example_cue
            ));
        }
        if self.max_order_candidates == 0 {
            return Err("max_order_candidates must be greater than 0".to_string());
        }
        Ok(())
    }
}
