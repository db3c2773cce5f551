use anyhow::Result;
use gymsched_core::error::CoreError;
use gymsched_core::validator::RuleValidator;
use owo_colors::{OwoColorize, Style};

use crate::cli::ValidateCommand;
use crate::util::{print_json, read_rule};
use crate::views::table::display_rule_summary;

pub fn validate_rule(validator: &RuleValidator, command: ValidateCommand) -> Result<()> {
    let rule = read_rule(&command.file)?;
    let valid = validator.validate(&rule).map_err(CoreError::from)?;

    if command.json {
        return print_json(&valid.to_rule());
    }

    let success_style = Style::new().green().bold();
    println!("{} Rule is valid", "✓".style(success_style));
    display_rule_summary(&valid, validator.options());
    Ok(())
}
