use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use gymsched_core::datetime::DATE_FORMAT;
use gymsched_core::form::ScheduleForm;
use gymsched_core::models::RuleDefaults;

use crate::cli::NewCommand;
use crate::util::print_json;

pub fn new_rule(command: NewCommand) -> Result<()> {
    let defaults = RuleDefaults {
        frequency: command.frequency.unwrap_or_default(),
        title: command.title.unwrap_or_default(),
        ..Default::default()
    };

    let form = match command.today {
        Some(today) => {
            let today = NaiveDate::parse_from_str(today.trim(), DATE_FORMAT)
                .map_err(|e| anyhow!("Failed to parse date '{}': {}", today, e))?;
            ScheduleForm::with_today(defaults, today)
        }
        None => ScheduleForm::new(defaults),
    };

    print_json(form.rule())
}
