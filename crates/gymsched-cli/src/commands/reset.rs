use anyhow::Result;
use gymsched_core::reset::apply_frequency;

use crate::cli::ResetCommand;
use crate::util::{print_json, read_rule};

pub fn reset_rule(command: ResetCommand) -> Result<()> {
    let rule = read_rule(&command.file)?;
    let updated = apply_frequency(rule, command.frequency);
    print_json(&updated)
}
