use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Schedule rule is invalid: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRRule(String),

    #[error("Schedule submission failed: {0}")]
    Gateway(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// Rule fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    Frequency,
    Start,
    End,
    SelectedWeekdays,
    WeekNumber,
    SelectedMonths,
}

impl RuleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleField::Frequency => "frequency",
            RuleField::Start => "start",
            RuleField::End => "end",
            RuleField::SelectedWeekdays => "selected_weekdays",
            RuleField::WeekNumber => "week_number",
            RuleField::SelectedMonths => "selected_months",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<RuleField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field` unless one is already present.
    pub fn add(&mut self, field: RuleField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: RuleField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RuleField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = RuleField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleField, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
