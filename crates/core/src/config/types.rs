use serde::{Deserialize, Serialize};

use crate::inference::{AnswerEngine, InferenceConfig};
use crate::keyword::{
    default_keyword_exclude, AutoSelectConfig, IdleSchedule, KeywordError, KeywordSelector,
    ScheduleConfig,
};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub date_auto_select: AutoSelectConfig,
    #[serde(default)]
    pub area_auto_select: AutoSelectConfig,
    /// Rows matching this expression are never selected, in either section.
    #[serde(default = "default_keyword_exclude")]
    pub keyword_exclude: String,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            date_auto_select: AutoSelectConfig::default(),
            area_auto_select: AutoSelectConfig::default(),
            keyword_exclude: default_keyword_exclude(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl Config {
    pub fn answer_engine(&self) -> AnswerEngine {
        AnswerEngine::with_config(self.inference.clone())
    }

    pub fn date_selector(&self) -> KeywordSelector {
        KeywordSelector::from_config(&self.date_auto_select, &self.keyword_exclude)
    }

    pub fn area_selector(&self) -> KeywordSelector {
        KeywordSelector::from_config(&self.area_auto_select, &self.keyword_exclude)
    }

    pub fn idle_schedule(&self) -> Result<IdleSchedule, KeywordError> {
        IdleSchedule::from_config(&self.schedule)
    }
}
