use chrono::{Duration, NaiveDateTime, Weekday};
use rrule::{RRuleSet, Tz as RRuleTz};
use serde::Serialize;

use crate::datetime::ScheduleTime;
use crate::error::CoreError;
use crate::models::{EndType, Frequency};
use crate::validator::{ValidRule, ValidSlot};

const RRULE_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Configuration for occurrence expansion
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Length of each hourly/daily occurrence
    pub default_duration_minutes: u32,
    /// Upper bound on occurrences returned per projection
    pub max_occurrences: usize,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            max_occurrences: 1000,
        }
    }
}

/// Half-open range of floating local times to expand a rule over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ProjectionWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::InvalidDate(format!(
                "projection window ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering `days` whole days from midnight of `from`.
    pub fn days_from(from: chrono::NaiveDate, days: u32) -> Result<Self, CoreError> {
        let start = ScheduleTime::Date(from).to_naive();
        let end = start
            .checked_add_signed(Duration::days(i64::from(days.max(1))))
            .ok_or_else(|| {
                CoreError::InvalidDate(format!("{} days from {} is out of range", days, from))
            })?;
        Ok(Self { start, end })
    }
}

/// A concrete calendar entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// OccurrenceProjector: expands validated rules into calendar occurrences.
///
/// Each weekday window of a weekly/monthly/yearly rule becomes its own
/// RFC 5545 rule anchored at the window's start time, so windows on the same
/// weekday with different hours expand independently. Times are floating and
/// evaluated as UTC.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceProjector {
    config: ProjectorConfig,
}

impl OccurrenceProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Generates the occurrences of `rule` that start inside `window`,
    /// sorted by start time.
    pub fn project(
        &self,
        rule: &ValidRule,
        window: ProjectionWindow,
    ) -> Result<Vec<Occurrence>, CoreError> {
        let until = match (rule.end_type, rule.end) {
            (EndType::On, Some(end)) => Some(end.inclusive_end()),
            _ => None,
        };

        let mut occurrences = Vec::new();

        if rule.frequency.uses_time_of_day() {
            let dtstart = rule.start.to_naive();
            let duration = Duration::minutes(i64::from(self.config.default_duration_minutes));
            let body = build_rrule_body(rule.frequency, None, rule, until);
            for start in self.expand(dtstart, &body, until, window)? {
                let end = shift(start, duration)?;
                occurrences.push(self.occurrence(rule, None, start, end));
            }
        } else {
            for slot in &rule.slots {
                let dtstart = rule.start.date().and_time(slot.start_time);
                let body = build_rrule_body(rule.frequency, Some(slot), rule, until);
                for start in self.expand(dtstart, &body, until, window)? {
                    let mut end = start.date().and_time(slot.end_time);
                    if end <= start {
                        end = shift(end, Duration::days(1))?;
                    }
                    occurrences.push(self.occurrence(rule, Some(slot), start, end));
                }
            }
        }

        occurrences.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
        occurrences.truncate(self.config.max_occurrences);

        tracing::debug!(
            frequency = %rule.frequency,
            count = occurrences.len(),
            window_start = %window.start,
            window_end = %window.end,
            "projected schedule occurrences"
        );

        Ok(occurrences)
    }

    fn expand(
        &self,
        dtstart: NaiveDateTime,
        body: &str,
        until: Option<NaiveDateTime>,
        window: ProjectionWindow,
    ) -> Result<Vec<NaiveDateTime>, CoreError> {
        if until.is_some_and(|until| until < dtstart) {
            return Ok(Vec::new());
        }

        let rrule_string = format!(
            "DTSTART:{}\nRRULE:{}",
            dtstart.format(RRULE_DATE_FORMAT),
            body
        );
        let rrule_set = rrule_string.parse::<RRuleSet>().map_err(|e| {
            CoreError::InvalidRRule(format!("Failed to parse RRULE '{}': {}", rrule_string, e))
        })?;

        // Bounds are widened by a second and the exact window applied below.
        let limit = self.config.max_occurrences.min(u16::MAX as usize) as u16;
        let after = shift(window.start, Duration::seconds(-1))?;
        let before = shift(window.end, Duration::seconds(1))?;
        let bounded = rrule_set
            .after(after.and_utc().with_timezone(&RRuleTz::UTC))
            .before(before.and_utc().with_timezone(&RRuleTz::UTC));

        Ok(bounded
            .all(limit)
            .dates
            .into_iter()
            .map(|dt| dt.naive_utc())
            .filter(|dt| *dt >= window.start && *dt < window.end)
            .collect())
    }

    fn occurrence(
        &self,
        rule: &ValidRule,
        slot: Option<&ValidSlot>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Occurrence {
        Occurrence {
            start,
            end,
            title: rule.title.clone(),
            day_of_week: slot.map(|s| s.day_of_week.clone()),
            color: rule.color.clone(),
            background_color: rule.background_color.clone(),
        }
    }
}

/// Builds the `RRULE:` value (without DTSTART) for one slot of `rule`.
pub fn build_rrule_body(
    frequency: Frequency,
    slot: Option<&ValidSlot>,
    rule: &ValidRule,
    until: Option<NaiveDateTime>,
) -> String {
    let mut parts = vec![format!("FREQ={}", frequency.as_str().to_uppercase())];

    if let Some(slot) = slot {
        let day = weekday_code(slot.weekday);
        let by_day = match frequency {
            Frequency::Monthly => rule
                .week_numbers
                .iter()
                .map(|week| format!("{}{}", week.code(), day))
                .collect::<Vec<_>>()
                .join(","),
            _ => day.to_string(),
        };
        parts.push(format!("BYDAY={}", by_day));
    }

    if frequency == Frequency::Yearly {
        let by_month = rule
            .months
            .iter()
            .map(|month| month.number().to_string())
            .collect::<Vec<_>>()
            .join(",");
        parts.push(format!("BYMONTH={}", by_month));
    }

    if let Some(until) = until {
        parts.push(format!("UNTIL={}", until.format(RRULE_DATE_FORMAT)));
    }

    parts.join(";")
}

fn shift(value: NaiveDateTime, by: Duration) -> Result<NaiveDateTime, CoreError> {
    value
        .checked_add_signed(by)
        .ok_or_else(|| {
            CoreError::InvalidDate(format!("{} shifted by {} is out of range", value, by))
        })
}

fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
