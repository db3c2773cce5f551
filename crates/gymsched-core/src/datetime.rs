//! Date strings exchanged with the schedule API.
//!
//! Date-only frequencies use `YYYY-MM-DD`, hourly and daily rules use
//! `YYYY-MM-DD HH:mm`. Weekday windows use `HH:mm`. Seconds are accepted on
//! input and dropped.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use crate::error::CoreError;
use crate::models::Frequency;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const TIME_FORMAT: &str = "%H:%M";

const DATE_TIME_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// A `start`/`end` value: either a calendar date or a minute-precision
/// date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl ScheduleTime {
    /// Parses either API format.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidDate("empty value".to_string()));
        }

        for format in DATE_TIME_INPUT_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(ScheduleTime::DateTime(truncate_to_minute(dt)));
            }
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(ScheduleTime::Date)
            .map_err(|e| CoreError::InvalidDate(format!("'{}': {}", trimmed, e)))
    }

    /// Parses and converts to the shape `frequency` stores.
    pub fn parse_for(frequency: Frequency, input: &str) -> Result<Self, CoreError> {
        Self::parse(input).map(|value| value.for_frequency(frequency))
    }

    /// Hourly/daily rules get a date-time (dates become midnight); the other
    /// frequencies keep only the date.
    pub fn for_frequency(self, frequency: Frequency) -> Self {
        if frequency.uses_time_of_day() {
            ScheduleTime::DateTime(self.to_naive())
        } else {
            ScheduleTime::Date(self.date())
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            ScheduleTime::Date(date) => *date,
            ScheduleTime::DateTime(dt) => dt.date(),
        }
    }

    /// The instant this value denotes; dates start at midnight.
    pub fn to_naive(&self) -> NaiveDateTime {
        match self {
            ScheduleTime::Date(date) => date.and_time(NaiveTime::MIN),
            ScheduleTime::DateTime(dt) => *dt,
        }
    }

    /// Last instant covered by this value; a date covers the whole day.
    pub fn inclusive_end(&self) -> NaiveDateTime {
        match self {
            ScheduleTime::Date(date) => date.and_time(last_second_of_day()),
            ScheduleTime::DateTime(dt) => *dt,
        }
    }

    pub fn to_api_string(&self) -> String {
        match self {
            ScheduleTime::Date(date) => date.format(DATE_FORMAT).to_string(),
            ScheduleTime::DateTime(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        }
    }

    pub fn to_api_string_for(&self, frequency: Frequency) -> String {
        self.for_frequency(frequency).to_api_string()
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_api_string())
    }
}

/// Parses an `HH:mm` weekday window bound.
pub fn parse_time(input: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(|t| t.with_second(0).unwrap_or(t))
        .map_err(|e| CoreError::InvalidDate(format!("time '{}': {}", trimmed, e)))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Re-expresses a raw `start`/`end` string in the format `frequency` expects.
/// Unparseable input is returned untouched.
pub fn convert_for(frequency: Frequency, raw: &str) -> String {
    match ScheduleTime::parse(raw) {
        Ok(value) => value.to_api_string_for(frequency),
        Err(_) => raw.to_string(),
    }
}

fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

fn last_second_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
