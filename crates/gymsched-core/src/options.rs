//! Option tables shown by schedule forms and used to check submitted values.

use chrono::Weekday;

use crate::models::{Frequency, Month, WeekNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayOption {
    /// Value sent to the API in `day_of_week`
    pub value: String,
    pub label: String,
    pub weekday: Weekday,
}

/// Immutable lookup tables handed to the validator and the front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOptions {
    pub frequencies: Vec<(Frequency, String)>,
    pub weekdays: Vec<WeekdayOption>,
    pub week_numbers: Vec<(WeekNumber, String)>,
    /// Labels indexed by zero-based month
    pub months: Vec<String>,
}

impl Default for RuleOptions {
    fn default() -> Self {
        let frequencies = Frequency::ALL
            .iter()
            .map(|f| {
                let label = match f {
                    Frequency::Hourly => "Hourly",
                    Frequency::Daily => "Daily",
                    Frequency::Weekly => "Weekly",
                    Frequency::Monthly => "Monthly",
                    Frequency::Yearly => "Yearly",
                };
                (*f, label.to_string())
            })
            .collect();

        let weekdays = [
            ("monday", "Monday", Weekday::Mon),
            ("tuesday", "Tuesday", Weekday::Tue),
            ("wednesday", "Wednesday", Weekday::Wed),
            ("thursday", "Thursday", Weekday::Thu),
            ("friday", "Friday", Weekday::Fri),
            ("saturday", "Saturday", Weekday::Sat),
            ("sunday", "Sunday", Weekday::Sun),
        ]
        .into_iter()
        .map(|(value, label, weekday)| WeekdayOption {
            value: value.to_string(),
            label: label.to_string(),
            weekday,
        })
        .collect();

        let week_numbers = WeekNumber::ALL
            .iter()
            .map(|w| {
                let label = match w {
                    WeekNumber::First => "First week",
                    WeekNumber::Second => "Second week",
                    WeekNumber::Third => "Third week",
                    WeekNumber::Fourth => "Fourth week",
                    WeekNumber::Last => "Last week",
                };
                (*w, label.to_string())
            })
            .collect();

        let months = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            frequencies,
            weekdays,
            week_numbers,
            months,
        }
    }
}

impl RuleOptions {
    /// Matches a `day_of_week` string against the weekday table by value or
    /// label, ignoring case.
    pub fn weekday(&self, day_of_week: &str) -> Option<&WeekdayOption> {
        let needle = day_of_week.trim();
        self.weekdays.iter().find(|option| {
            option.value.eq_ignore_ascii_case(needle) || option.label.eq_ignore_ascii_case(needle)
        })
    }

    pub fn frequency_label(&self, frequency: Frequency) -> &str {
        self.frequencies
            .iter()
            .find(|(f, _)| *f == frequency)
            .map(|(_, label)| label.as_str())
            .unwrap_or(frequency.as_str())
    }

    pub fn week_number_label(&self, week: WeekNumber) -> Option<&str> {
        self.week_numbers
            .iter()
            .find(|(w, _)| *w == week)
            .map(|(_, label)| label.as_str())
    }

    pub fn month_label(&self, month: Month) -> Option<&str> {
        self.months.get(month.index() as usize).map(String::as_str)
    }
}
