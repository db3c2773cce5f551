//! Frequency transitions for an in-progress rule.
//!
//! Selecting a new frequency clears fields that no longer apply so a rule
//! never carries selections left over from an earlier frequency. This is a
//! convenience for the form; [`crate::validator::RuleValidator`] remains the
//! gate before submission.

use crate::datetime::convert_for;
use crate::models::{Frequency, RecurrenceRule, WeekdaySlot};

/// Returns `rule` as it should look after the user picks `frequency`.
///
/// Re-selecting the current frequency returns the rule unchanged.
pub fn apply_frequency(mut rule: RecurrenceRule, frequency: Frequency) -> RecurrenceRule {
    if rule.frequency == frequency {
        return rule;
    }

    tracing::debug!(from = %rule.frequency, to = %frequency, "resetting schedule rule fields");

    match frequency {
        Frequency::Hourly | Frequency::Daily => {
            rule.selected_weekdays.clear();
            rule.week_number.clear();
            rule.selected_months.clear();
        }
        Frequency::Weekly => {
            rule.week_number.clear();
            rule.selected_months.clear();
            ensure_weekday_slot(&mut rule);
        }
        Frequency::Monthly => {
            rule.selected_months.clear();
            ensure_weekday_slot(&mut rule);
        }
        Frequency::Yearly => {
            rule.week_number.clear();
            ensure_weekday_slot(&mut rule);
        }
    }

    rule.start = convert_for(frequency, &rule.start);
    rule.end = rule.end.as_deref().map(|end| convert_for(frequency, end));
    rule.frequency = frequency;
    rule
}

fn ensure_weekday_slot(rule: &mut RecurrenceRule) {
    if rule.selected_weekdays.is_empty() {
        rule.selected_weekdays.push(WeekdaySlot::placeholder());
    }
}
