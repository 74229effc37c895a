//! Idle/resume decisions from wall-clock keywords.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ScheduleConfig;
use super::expression::{KeywordError, KeywordExpression};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleAction {
    Idle,
    Resume,
}

/// Parsed schedule keywords. The caller reads the clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdleSchedule {
    idle: KeywordExpression,
    resume: KeywordExpression,
    idle_second: KeywordExpression,
    resume_second: KeywordExpression,
}

impl IdleSchedule {
    pub fn from_config(config: &ScheduleConfig) -> Result<Self, KeywordError> {
        Ok(Self {
            idle: KeywordExpression::parse(&config.idle_keyword)?,
            resume: KeywordExpression::parse(&config.resume_keyword)?,
            idle_second: KeywordExpression::parse(&config.idle_keyword_second)?,
            resume_second: KeywordExpression::parse(&config.resume_keyword_second)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
            && self.resume.is_empty()
            && self.idle_second.is_empty()
            && self.resume_second.is_empty()
    }

    /// Action for wall-clock `time`, if any keyword matches.
    ///
    /// Checked in order: idle then resume on `HH:MM:SS`, idle then resume on
    /// `SS`. The last match wins.
    pub fn action_at(&self, time: NaiveTime) -> Option<ScheduleAction> {
        let clock = time.format("%H:%M:%S").to_string();
        let second = time.format("%S").to_string();

        let checks = [
            (&self.idle, clock.as_str(), ScheduleAction::Idle),
            (&self.resume, clock.as_str(), ScheduleAction::Resume),
            (&self.idle_second, second.as_str(), ScheduleAction::Idle),
            (&self.resume_second, second.as_str(), ScheduleAction::Resume),
        ];

        let action = checks
            .iter()
            .filter(|(keyword, text, _)| !keyword.is_empty() && keyword.matches(text))
            .map(|(_, _, action)| *action)
            .last();

        if let Some(action) = action {
            debug!("Schedule at {}: {:?}", clock, action);
        }
        action
    }
}
