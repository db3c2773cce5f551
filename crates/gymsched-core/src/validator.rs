use chrono::{NaiveTime, Weekday};
use std::collections::BTreeSet;

use crate::datetime::{format_time, parse_time, ScheduleTime};
use crate::error::{RuleField, ValidationErrors};
use crate::models::{EndType, Frequency, Month, RecurrenceRule, WeekNumber, WeekdaySlot};
use crate::options::RuleOptions;

/// Validation knobs that differ between deployments.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Reject fixed-end rules whose `end` precedes `start`
    pub enforce_end_after_start: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enforce_end_after_start: true,
        }
    }
}

/// A weekday window whose strings have been checked and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSlot {
    /// The value as it was submitted, kept for the API payload
    pub day_of_week: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A rule that passed validation, with fields irrelevant to its frequency
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRule {
    pub frequency: Frequency,
    pub start: ScheduleTime,
    /// Present only when `end_type` is [`EndType::On`]
    pub end: Option<ScheduleTime>,
    pub end_type: EndType,
    pub slots: Vec<ValidSlot>,
    pub week_numbers: BTreeSet<WeekNumber>,
    pub months: BTreeSet<Month>,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl ValidRule {
    /// Converts back into the wire-shaped rule.
    pub fn to_rule(&self) -> RecurrenceRule {
        RecurrenceRule {
            frequency: self.frequency,
            start: self.start.to_api_string(),
            end: self.end.map(|end| end.to_api_string()),
            end_type: self.end_type,
            week_number: self.week_numbers.clone(),
            selected_months: self.months.clone(),
            selected_weekdays: self
                .slots
                .iter()
                .map(|slot| {
                    WeekdaySlot::new(
                        slot.day_of_week.clone(),
                        format_time(slot.start_time),
                        format_time(slot.end_time),
                    )
                })
                .collect(),
            title: self.title.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            background_color: self.background_color.clone(),
        }
    }
}

/// Checks a [`RecurrenceRule`] for internal consistency before it may be
/// submitted.
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    options: RuleOptions,
    config: ValidatorConfig,
}

impl RuleValidator {
    pub fn new(options: RuleOptions, config: ValidatorConfig) -> Self {
        Self { options, config }
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Validates `rule`, collecting one message for every violated field.
    ///
    /// # Behavior
    /// - `start` must parse; date-only frequencies drop any time component
    /// - weekly/monthly/yearly need at least one complete weekday window
    /// - monthly needs a week of the month, yearly needs a month
    /// - `end_type = on` needs a parseable `end`, not before `start` unless
    ///   [`ValidatorConfig::enforce_end_after_start`] is off
    pub fn validate(&self, rule: &RecurrenceRule) -> Result<ValidRule, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let frequency = rule.frequency;

        let start = if rule.start.trim().is_empty() {
            errors.add(RuleField::Start, "Start date is required");
            None
        } else {
            match ScheduleTime::parse_for(frequency, &rule.start) {
                Ok(start) => Some(start),
                Err(_) => {
                    errors.add(RuleField::Start, expected_format_message("Start", frequency));
                    None
                }
            }
        };

        let end = match rule.end_type {
            EndType::Never => None,
            EndType::On => match rule.end.as_deref().map(str::trim) {
                None | Some("") => {
                    errors.add(
                        RuleField::End,
                        "End date is required when the schedule ends on a date",
                    );
                    None
                }
                Some(raw) => match ScheduleTime::parse_for(frequency, raw) {
                    Ok(end) => Some(end),
                    Err(_) => {
                        errors.add(RuleField::End, expected_format_message("End", frequency));
                        None
                    }
                },
            },
        };

        if let (Some(start), Some(end)) = (start, end) {
            if self.config.enforce_end_after_start && end.to_naive() < start.to_naive() {
                errors.add(RuleField::End, "End date must not be before the start date");
            }
        }

        let slots = if frequency.requires_weekdays() {
            self.validate_slots(&rule.selected_weekdays, &mut errors)
        } else {
            Vec::new()
        };

        let week_numbers = if frequency.requires_week_numbers() {
            if rule.week_number.is_empty() {
                errors.add(RuleField::WeekNumber, "Select at least one week of the month");
            }
            rule.week_number.clone()
        } else {
            BTreeSet::new()
        };

        let months = if frequency.requires_months() {
            if rule.selected_months.is_empty() {
                errors.add(RuleField::SelectedMonths, "Select at least one month");
            }
            rule.selected_months.clone()
        } else {
            BTreeSet::new()
        };

        match start {
            Some(start) if errors.is_empty() => {
                tracing::debug!(%frequency, slots = slots.len(), "schedule rule validated");
                Ok(ValidRule {
                    frequency,
                    start,
                    end,
                    end_type: rule.end_type,
                    slots,
                    week_numbers,
                    months,
                    title: rule.title.clone(),
                    description: rule.description.clone(),
                    color: rule.color.clone(),
                    background_color: rule.background_color.clone(),
                })
            }
            _ => {
                tracing::debug!(%frequency, errors = %errors, "schedule rule rejected");
                Err(errors)
            }
        }
    }

    fn validate_slots(
        &self,
        slots: &[WeekdaySlot],
        errors: &mut ValidationErrors,
    ) -> Vec<ValidSlot> {
        if slots.is_empty() {
            errors.add(RuleField::SelectedWeekdays, "Add at least one weekday");
            return Vec::new();
        }

        let mut valid = Vec::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            match self.validate_slot(slot) {
                Ok(parsed) => valid.push(parsed),
                Err(message) => {
                    errors.add(
                        RuleField::SelectedWeekdays,
                        format!("Weekday {}: {}", index + 1, message),
                    );
                }
            }
        }
        valid
    }

    fn validate_slot(&self, slot: &WeekdaySlot) -> Result<ValidSlot, String> {
        if slot.is_blank() {
            return Err("choose a day of week and its start and end times".to_string());
        }
        if slot.day_of_week.trim().is_empty() {
            return Err("day of week is required".to_string());
        }
        if slot.start_time.trim().is_empty() {
            return Err("start time is required".to_string());
        }
        if slot.end_time.trim().is_empty() {
            return Err("end time is required".to_string());
        }

        let weekday = self
            .options
            .weekday(&slot.day_of_week)
            .map(|option| option.weekday)
            .ok_or_else(|| format!("unknown day of week '{}'", slot.day_of_week.trim()))?;
        let start_time = parse_time(&slot.start_time)
            .map_err(|_| format!("start time '{}' is not HH:mm", slot.start_time.trim()))?;
        let end_time = parse_time(&slot.end_time)
            .map_err(|_| format!("end time '{}' is not HH:mm", slot.end_time.trim()))?;

        Ok(ValidSlot {
            day_of_week: slot.day_of_week.trim().to_string(),
            weekday,
            start_time,
            end_time,
        })
    }
}

fn expected_format_message(label: &str, frequency: Frequency) -> String {
    if frequency.uses_time_of_day() {
        format!("{} must be a date and time (YYYY-MM-DD HH:mm)", label)
    } else {
        format!("{} must be a date (YYYY-MM-DD)", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn monday_slot() -> WeekdaySlot {
        WeekdaySlot::new("monday", "09:00", "10:00")
    }

    fn rule(frequency: Frequency) -> RecurrenceRule {
        RecurrenceRule {
            frequency,
            start: "2024-01-01".to_string(),
            selected_weekdays: vec![monday_slot()],
            week_number: [WeekNumber::First].into_iter().collect(),
            selected_months: [Month::new(0).unwrap()].into_iter().collect(),
            title: "Yoga".to_string(),
            ..Default::default()
        }
    }

    fn month(index: u8) -> Month {
        Month::new(index).unwrap()
    }

    #[rstest]
    #[case(Frequency::Weekly)]
    #[case(Frequency::Monthly)]
    #[case(Frequency::Yearly)]
    fn test_empty_weekdays_rejected(#[case] frequency: Frequency) {
        let mut rule = rule(frequency);
        rule.selected_weekdays.clear();

        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert!(errors.contains(RuleField::SelectedWeekdays));
    }

    #[rstest]
    #[case(WeekdaySlot::new("", "09:00", "10:00"))]
    #[case(WeekdaySlot::new("monday", "", "10:00"))]
    #[case(WeekdaySlot::new("monday", "09:00", ""))]
    #[case(WeekdaySlot::new("caturday", "09:00", "10:00"))]
    #[case(WeekdaySlot::new("monday", "nine", "10:00"))]
    fn test_incomplete_slot_rejected(#[case] slot: WeekdaySlot) {
        let mut rule = rule(Frequency::Weekly);
        rule.selected_weekdays = vec![monday_slot(), slot];

        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        let message = errors.get(RuleField::SelectedWeekdays).unwrap();
        assert!(message.starts_with("Weekday 2:"), "{}", message);
    }

    #[test]
    fn test_placeholder_slot_rejected() {
        let mut rule = rule(Frequency::Weekly);
        rule.selected_weekdays = vec![WeekdaySlot::placeholder()];

        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert_eq!(
            errors.get(RuleField::SelectedWeekdays),
            Some("Weekday 1: choose a day of week and its start and end times")
        );
    }

    #[test]
    fn test_monthly_requires_week_number() {
        let mut rule = rule(Frequency::Monthly);
        rule.week_number.clear();
        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert!(errors.contains(RuleField::WeekNumber));

        rule.week_number.insert(WeekNumber::Last);
        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert_eq!(valid.week_numbers.into_iter().collect::<Vec<_>>(), vec![WeekNumber::Last]);
    }

    #[test]
    fn test_yearly_requires_month() {
        let mut rule = rule(Frequency::Yearly);
        rule.selected_months.clear();
        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert!(errors.contains(RuleField::SelectedMonths));

        rule.selected_months = [month(0), month(11)].into_iter().collect();
        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert_eq!(valid.months.len(), 2);
    }

    #[test]
    fn test_weekly_never_ending_needs_no_end() {
        let rule = RecurrenceRule {
            frequency: Frequency::Weekly,
            start: "2024-01-01".to_string(),
            end_type: EndType::Never,
            selected_weekdays: vec![monday_slot()],
            ..Default::default()
        };

        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert_eq!(valid.end, None);
        assert_eq!(valid.slots[0].weekday, Weekday::Mon);
        assert_eq!(valid.slots[0].start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_hourly_needs_no_weekdays_or_months() {
        let rule = RecurrenceRule {
            frequency: Frequency::Hourly,
            start: "2024-01-01 09:00".to_string(),
            end: Some("2024-01-01 10:00".to_string()),
            end_type: EndType::On,
            ..Default::default()
        };

        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert_eq!(valid.start.to_api_string(), "2024-01-01 09:00");
        assert_eq!(valid.end.map(|e| e.to_api_string()).as_deref(), Some("2024-01-01 10:00"));
    }

    #[test]
    fn test_irrelevant_fields_dropped() {
        let mut rule = rule(Frequency::Weekly);
        rule.selected_months = [month(3)].into_iter().collect();

        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert!(valid.week_numbers.is_empty());
        assert!(valid.months.is_empty());
    }

    #[test]
    fn test_end_on_requires_end() {
        let mut rule = rule(Frequency::Weekly);
        rule.end_type = EndType::On;
        rule.end = None;
        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert!(errors.contains(RuleField::End));

        rule.end = Some("whenever".to_string());
        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert_eq!(errors.get(RuleField::End), Some("End must be a date (YYYY-MM-DD)"));
    }

    #[test]
    fn test_end_before_start() {
        let mut rule = rule(Frequency::Weekly);
        rule.end_type = EndType::On;
        rule.end = Some("2023-12-31".to_string());

        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        assert_eq!(errors.get(RuleField::End), Some("End date must not be before the start date"));

        let lenient = RuleValidator::new(
            RuleOptions::default(),
            ValidatorConfig {
                enforce_end_after_start: false,
            },
        );
        assert!(lenient.validate(&rule).is_ok());
    }

    #[test]
    fn test_same_day_end_is_accepted() {
        let mut rule = rule(Frequency::Weekly);
        rule.end_type = EndType::On;
        rule.end = Some("2024-01-01".to_string());
        assert!(RuleValidator::default().validate(&rule).is_ok());
    }

    #[test]
    fn test_end_ignored_when_never() {
        let mut rule = rule(Frequency::Weekly);
        rule.end = Some("not a date".to_string());
        rule.end_type = EndType::Never;
        assert!(RuleValidator::default().validate(&rule).is_ok());
    }

    #[test]
    fn test_reports_every_violated_field() {
        let rule = RecurrenceRule {
            frequency: Frequency::Monthly,
            start: String::new(),
            end_type: EndType::On,
            ..Default::default()
        };

        let errors = RuleValidator::default().validate(&rule).unwrap_err();
        let fields: Vec<RuleField> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                RuleField::Start,
                RuleField::End,
                RuleField::SelectedWeekdays,
                RuleField::WeekNumber,
            ]
        );
    }

    #[test]
    fn test_date_only_frequency_drops_time() {
        let mut rule = rule(Frequency::Weekly);
        rule.start = "2024-01-01 18:00".to_string();
        let valid = RuleValidator::default().validate(&rule).unwrap();
        assert_eq!(valid.start.to_api_string(), "2024-01-01");
    }

    #[test]
    fn test_to_rule_round_trip() {
        let mut rule = rule(Frequency::Monthly);
        rule.week_number = [WeekNumber::Second, WeekNumber::Last].into_iter().collect();
        let valid = RuleValidator::default().validate(&rule).unwrap();
        let back = valid.to_rule();

        assert_eq!(back.selected_weekdays, vec![monday_slot()]);
        assert!(back.selected_months.is_empty());
        assert_eq!(RuleValidator::default().validate(&back).unwrap(), valid);
    }
}
