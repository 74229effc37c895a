//! Keyword matching and row selection.
//!
//! Keyword lists choose which performance date or seating area to click.
//! They are stored as `"A B","C"` (OR across quoted terms, AND across spaces
//! within a term) and shown to users as `A B;C`.

pub mod config;
pub mod expression;
pub mod format;
pub mod schedule;
pub mod select;

pub use config::{default_keyword_exclude, AutoSelectConfig, ScheduleConfig, DEFAULT_KEYWORD_EXCLUDE};
pub use expression::{is_match, KeywordError, KeywordExpression, KeywordTerm};
pub use format::{to_display, to_storage, KEYWORD_DELIMITER};
pub use schedule::{IdleSchedule, ScheduleAction};
pub use select::{select, select_index, Exclusion, KeywordSelector, SelectionMode};
