//! Command-line front end for the ticketeer engine.
//!
//! Logs go to stderr; stdout carries only results.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Section;

#[derive(Parser)]
#[command(name = "ticketeer", version)]
#[command(about = "Answer ticket-page verification questions and pick rows by keyword")]
struct Cli {
    /// Path to a TOML configuration file (falls back to TICKETEER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Infer candidate answers for a verification question
    Answer {
        /// Question text as shown on the page
        question: String,
        /// Displayed event date/time, e.g. "2025/12/24 19:30"
        #[arg(long)]
        event_datetime: Option<String>,
        /// Print the full inference as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select one row using the configured keywords
    Select {
        /// Use the area section of the configuration
        #[arg(long, conflicts_with = "date", required_unless_present = "date")]
        area: bool,
        /// Use the date section of the configuration
        #[arg(long)]
        date: bool,
        /// Seed for the random selection mode
        #[arg(long)]
        seed: Option<u64>,
        /// Row texts, top to bottom
        #[arg(required = true)]
        rows: Vec<String>,
    },
    /// Convert keyword lists between display and storage form
    Keyword {
        #[command(subcommand)]
        action: KeywordAction,
    },
    /// Report the idle/resume action for a wall-clock time
    Schedule {
        /// Time as HH:MM:SS (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
enum KeywordAction {
    /// `"A B","C"` to `A B;C`
    ToDisplay { value: String },
    /// `A B;C` to `"A B","C"`
    ToStorage { value: String },
}

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_configuration(cli.config)?;

    match cli.command {
        Command::Answer {
            question,
            event_datetime,
            json,
        } => {
            let output = commands::answer(&config, &question, event_datetime.as_deref(), json)?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Command::Select {
            area,
            date: _,
            seed,
            rows,
        } => {
            let section = if area { Section::Area } else { Section::Date };
            match commands::select_row(&config, section, &rows, seed) {
                Some(line) => println!("{}", line),
                None => warn!("No row selected"),
            }
        }
        Command::Keyword { action } => {
            let output = match action {
                KeywordAction::ToDisplay { value } => commands::keyword_to_display(&value),
                KeywordAction::ToStorage { value } => commands::keyword_to_storage(&value),
            };
            println!("{}", output);
        }
        Command::Schedule { at } => {
            let output = commands::schedule(&config, at.as_deref())?;
            println!("{}", output);
        }
    }

    Ok(())
}
