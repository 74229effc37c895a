//! Ticketeer configuration: one TOML file with `TICKETEER_*` overrides.
//!
//! Sections map onto the runtime objects: `[inference]` builds the
//! [`AnswerEngine`](crate::AnswerEngine), the two `*_auto_select` sections and
//! `keyword_exclude` build the row selectors, `[schedule]` the idle schedule.

mod loader;
mod types;
mod validate;

pub use loader::*;
pub use types::*;
pub use validate::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No ticketeer config at {0}")]
    FileNotFound(String),

    #[error("Invalid ticketeer config: {0}")]
    ParseError(String),

    #[error("Rejected ticketeer config: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_cause() {
        let err = ConfigError::FileNotFound("/etc/ticketeer.toml".to_string());
        assert_eq!(err.to_string(), "No ticketeer config at /etc/ticketeer.toml");

        let err = ConfigError::ValidationError("inference: example_cue is empty".to_string());
        assert!(err.to_string().ends_with("example_cue is empty"));
    }
}
