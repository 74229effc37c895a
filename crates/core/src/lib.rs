pub mod config;
pub mod inference;
pub mod keyword;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use inference::{
    AnswerEngine, Inference, InferenceConfig, InferenceOutcome, RuleKind, VetoReason,
};
pub use keyword::{
    is_match, select, to_display, to_storage, AutoSelectConfig, IdleSchedule, KeywordError,
    KeywordExpression, KeywordSelector, ScheduleAction, SelectionMode,
};
