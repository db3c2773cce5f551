use clap::{Parser, Subcommand};
use gymsched_core::models::Frequency;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Validate, reset and preview recurring gym class schedules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the rule a new schedule form starts with
    New(NewCommand),
    /// Validate a rule document
    Validate(ValidateCommand),
    /// Switch a rule to another frequency, clearing fields that no longer apply
    Reset(ResetCommand),
    /// Show the occurrences a rule produces
    Preview(PreviewCommand),
    /// Validate a rule and emit the schedule request body
    Submit(SubmitCommand),
    /// List frequency, weekday, week and month options
    Options,
}

#[derive(Parser, Debug, Clone)]
pub struct NewCommand {
    /// Initial frequency
    #[arg(long, help = "Initial frequency (hourly, daily, weekly, monthly, yearly)")]
    pub frequency: Option<Frequency>,
    /// Schedule title
    #[arg(long)]
    pub title: Option<String>,
    /// Start date to use instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Rule document (JSON), or '-' for stdin
    pub file: String,
    /// Print the normalized rule as JSON on success
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ResetCommand {
    /// Rule document (JSON), or '-' for stdin
    pub file: String,
    /// Frequency to switch to
    #[arg(long, short, help = "Frequency to switch to (hourly, daily, weekly, monthly, yearly)")]
    pub frequency: Frequency,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// Rule document (JSON), or '-' for stdin
    pub file: String,
    /// First day of the preview (YYYY-MM-DD); defaults to the rule start
    #[arg(long)]
    pub from: Option<String>,
    /// Number of days to cover
    #[arg(long, short)]
    pub days: Option<u32>,
    /// Print occurrences as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SubmitCommand {
    /// Rule document (JSON), or '-' for stdin
    pub file: String,
    /// Club the schedule belongs to
    #[arg(long)]
    pub club_id: u64,
    /// Class the schedule is linked to
    #[arg(long)]
    pub class_id: Option<u64>,
}
