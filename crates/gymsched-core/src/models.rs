use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::datetime::ScheduleTime;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Hourly,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Hourly and daily rules carry a time of day in `start`/`end`.
    pub fn uses_time_of_day(&self) -> bool {
        matches!(self, Frequency::Hourly | Frequency::Daily)
    }

    pub fn requires_weekdays(&self) -> bool {
        matches!(self, Frequency::Weekly | Frequency::Monthly | Frequency::Yearly)
    }

    pub fn requires_week_numbers(&self) -> bool {
        matches!(self, Frequency::Monthly)
    }

    pub fn requires_months(&self) -> bool {
        matches!(self, Frequency::Yearly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(Frequency::Hourly),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

/// How a rule terminates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
    /// Ends on the date carried in `end`.
    On,
    #[default]
    Never,
}

impl fmt::Display for EndType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndType::On => write!(f, "on"),
            EndType::Never => write!(f, "never"),
        }
    }
}

/// Week of the month a monthly rule fires in.
///
/// On the wire this is an integer in `{1, 2, 3, 4, -1}` where `-1` is the last
/// week of the month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i8", into = "i8")]
pub enum WeekNumber {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekNumber {
    pub const ALL: [WeekNumber; 5] = [
        WeekNumber::First,
        WeekNumber::Second,
        WeekNumber::Third,
        WeekNumber::Fourth,
        WeekNumber::Last,
    ];

    pub fn code(&self) -> i8 {
        match self {
            WeekNumber::First => 1,
            WeekNumber::Second => 2,
            WeekNumber::Third => 3,
            WeekNumber::Fourth => 4,
            WeekNumber::Last => -1,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid week number: {0} (expected 1, 2, 3, 4 or -1)")]
pub struct InvalidWeekNumber(i8);

impl TryFrom<i8> for WeekNumber {
    type Error = InvalidWeekNumber;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WeekNumber::First),
            2 => Ok(WeekNumber::Second),
            3 => Ok(WeekNumber::Third),
            4 => Ok(WeekNumber::Fourth),
            -1 => Ok(WeekNumber::Last),
            other => Err(InvalidWeekNumber(other)),
        }
    }
}

impl From<WeekNumber> for i8 {
    fn from(value: WeekNumber) -> Self {
        value.code()
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Zero-based month of the year (0 = January).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(index: u8) -> Option<Self> {
        (index < 12).then_some(Month(index))
    }

    /// Zero-based index as used on the wire.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Calendar month number, 1 to 12.
    pub fn number(&self) -> u8 {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (0..12).map(Month)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid month: {0} (expected 0-11)")]
pub struct InvalidMonth(u8);

impl TryFrom<u8> for Month {
    type Error = InvalidMonth;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value).ok_or(InvalidMonth(value))
    }
}

impl From<Month> for u8 {
    fn from(value: Month) -> Self {
        value.0
    }
}

/// A time window on one weekday, kept as the raw strings the form edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdaySlot {
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl WeekdaySlot {
    pub fn new(
        day_of_week: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week: day_of_week.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Empty entry added so the form always shows one row to fill in.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.day_of_week.trim().is_empty()
            && self.start_time.trim().is_empty()
            && self.end_time.trim().is_empty()
    }
}

/// Declarative definition of when a class or event occurs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// `YYYY-MM-DD`, or `YYYY-MM-DD HH:mm` for hourly/daily rules
    #[serde(default)]
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub end_type: EndType,
    #[serde(default)]
    pub week_number: BTreeSet<WeekNumber>,
    #[serde(default)]
    pub selected_months: BTreeSet<Month>,
    #[serde(default)]
    pub selected_weekdays: Vec<WeekdaySlot>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl RecurrenceRule {
    /// Builds the rule a freshly opened create-schedule form starts with.
    pub fn from_defaults(defaults: &RuleDefaults, today: chrono::NaiveDate) -> Self {
        let start = ScheduleTime::Date(today).to_api_string_for(defaults.frequency);
        let selected_weekdays = if defaults.frequency.requires_weekdays() {
            vec![WeekdaySlot::placeholder()]
        } else {
            Vec::new()
        };

        Self {
            frequency: defaults.frequency,
            start,
            end: None,
            end_type: EndType::Never,
            week_number: BTreeSet::new(),
            selected_months: BTreeSet::new(),
            selected_weekdays,
            title: defaults.title.clone(),
            description: defaults.description.clone(),
            color: defaults.color.clone(),
            background_color: defaults.background_color.clone(),
        }
    }

    /// Applies the frequency reset policy in place.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        let current = std::mem::take(self);
        *self = crate::reset::apply_frequency(current, frequency);
    }
}

/// Values the parent class/event form seeds a schedule with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleDefaults {
    pub club_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u64>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}
