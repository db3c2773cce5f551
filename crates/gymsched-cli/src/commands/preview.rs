use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use gymsched_core::datetime::DATE_FORMAT;
use gymsched_core::error::CoreError;
use gymsched_core::projector::{OccurrenceProjector, ProjectionWindow};
use gymsched_core::validator::RuleValidator;
use owo_colors::OwoColorize;

use crate::cli::PreviewCommand;
use crate::util::{print_json, read_rule};
use crate::views::table::display_occurrences;

pub fn preview_rule(
    validator: &RuleValidator,
    projector: &OccurrenceProjector,
    default_days: u32,
    command: PreviewCommand,
) -> Result<()> {
    let rule = read_rule(&command.file)?;
    let valid = validator.validate(&rule).map_err(CoreError::from)?;

    let from = match command.from {
        Some(from) => NaiveDate::parse_from_str(from.trim(), DATE_FORMAT)
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", from, e))?,
        None => valid.start.date(),
    };
    let days = command.days.unwrap_or(default_days);
    let window = ProjectionWindow::days_from(from, days)?;

    let occurrences = projector.project(&valid, window)?;

    if command.json {
        return print_json(&occurrences);
    }

    println!(
        "{} ({} to {})",
        "Schedule Preview".blue().bold(),
        window.start.format(DATE_FORMAT),
        window.end.format(DATE_FORMAT)
    );
    if !valid.title.is_empty() {
        println!("Title: {}", valid.title.cyan());
    }
    println!();
    display_occurrences(&occurrences);
    Ok(())
}
