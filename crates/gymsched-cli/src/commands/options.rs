use anyhow::Result;
use gymsched_core::options::RuleOptions;

use crate::views::table::display_options;

pub fn list_options(options: &RuleOptions) -> Result<()> {
    display_options(options);
    Ok(())
}
