//! Subcommand implementations. Each returns the text to print.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use ticketeer_core::{
    load_config, to_display, to_storage, validate_config, Config, InferenceOutcome,
    ScheduleAction,
};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TICKETEER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Date,
    Area,
}

/// Load and validate configuration; defaults when no path is given.
pub fn load_configuration(path: Option<PathBuf>) -> Result<Config> {
    let path = path.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

/// One answer per line, or the whole inference as JSON.
pub fn answer(
    config: &Config,
    question: &str,
    event_datetime: Option<&str>,
    json: bool,
) -> Result<String> {
    let engine = config.answer_engine();
    let inference = engine.infer(question, event_datetime);

    match inference.outcome {
        InferenceOutcome::Answered { rule } => {
            info!("Answered by {} ({} candidate(s))", rule, inference.answers.len())
        }
        InferenceOutcome::Vetoed { reason } => info!("Abstained: {}", reason),
        InferenceOutcome::NoMatch => info!("No answer found"),
    }

    if json {
        serde_json::to_string_pretty(&inference).context("Failed to serialize inference")
    } else {
        Ok(inference.answers.join("\n"))
    }
}

/// `index<TAB>row` for the selected row.
pub fn select_row(config: &Config, section: Section, rows: &[String], seed: Option<u64>) -> Option<String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    select_row_with(config, section, rows, &mut rng)
}

fn select_row_with<R: Rng + ?Sized>(
    config: &Config,
    section: Section,
    rows: &[String],
    rng: &mut R,
) -> Option<String> {
    let selector = match section {
        Section::Date => config.date_selector(),
        Section::Area => config.area_selector(),
    };
    info!("Selecting among {} row(s), mode {}", rows.len(), selector.mode());
    selector
        .select_index(rows, rng)
        .map(|index| format!("{}\t{}", index, rows[index]))
}

pub fn keyword_to_display(value: &str) -> String {
    to_display(value)
}

pub fn keyword_to_storage(value: &str) -> String {
    to_storage(value)
}

/// `idle`, `resume` or `none` for the given (or current) time.
pub fn schedule(config: &Config, at: Option<&str>) -> Result<String> {
    let time = match at {
        Some(text) => NaiveTime::parse_from_str(text, "%H:%M:%S")
            .with_context(|| format!("Invalid time {:?}, expected HH:MM:SS", text))?,
        None => Local::now().time(),
    };

    let schedule = config
        .idle_schedule()
        .context("Invalid schedule keywords")?;

    let label = match schedule.action_at(time) {
        Some(ScheduleAction::Idle) => "idle",
        Some(ScheduleAction::Resume) => "resume",
        None => "none",
    };
    Ok(label.to_string())
}
