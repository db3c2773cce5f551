use anyhow::{Context, Result};
use gymsched_core::models::RecurrenceRule;
use std::io::Read;

/// Reads a rule document from `path`, or from stdin when `path` is `-`.
pub fn read_rule(path: &str) -> Result<RecurrenceRule> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read rule from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file '{}'", path))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse rule document '{}'", path))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
