use comfy_table::{Attribute, Cell, Color, Table};
use gymsched_core::datetime::{format_time, DATE_TIME_FORMAT};
use gymsched_core::error::ValidationErrors;
use gymsched_core::models::{EndType, Month};
use gymsched_core::options::RuleOptions;
use gymsched_core::projector::Occurrence;
use gymsched_core::validator::ValidRule;

pub fn display_validation_errors(errors: &ValidationErrors) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Problem"]);

    for (field, message) in errors.iter() {
        table.add_row(vec![
            Cell::new(field.as_str()).fg(Color::Yellow),
            Cell::new(message),
        ]);
    }

    println!("{table}");
}

pub fn display_rule_summary(rule: &ValidRule, options: &RuleOptions) {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);

    table.add_row(vec![
        Cell::new("Frequency"),
        Cell::new(options.frequency_label(rule.frequency)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Start"), Cell::new(rule.start.to_api_string())]);

    let end = match (rule.end_type, rule.end) {
        (EndType::On, Some(end)) => end.to_api_string(),
        _ => "Never".to_string(),
    };
    table.add_row(vec![Cell::new("Ends"), Cell::new(end)]);

    if !rule.slots.is_empty() {
        let slots = rule
            .slots
            .iter()
            .map(|slot| {
                let label = options
                    .weekday(&slot.day_of_week)
                    .map(|o| o.label.as_str())
                    .unwrap_or(slot.day_of_week.as_str());
                format!("{} {}-{}", label, format_time(slot.start_time), format_time(slot.end_time))
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![Cell::new("Weekdays"), Cell::new(slots)]);
    }

    if !rule.week_numbers.is_empty() {
        let weeks = rule
            .week_numbers
            .iter()
            .map(|w| {
                options
                    .week_number_label(*w)
                    .map(str::to_string)
                    .unwrap_or_else(|| w.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new("Weeks"), Cell::new(weeks)]);
    }

    if !rule.months.is_empty() {
        let months = rule
            .months
            .iter()
            .map(|m| month_label(options, *m))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new("Months"), Cell::new(months)]);
    }

    println!("{table}");
}

pub fn display_occurrences(occurrences: &[Occurrence]) {
    if occurrences.is_empty() {
        println!("No occurrences in this period.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Day", "Start", "End", "Title"]);

    for (i, occurrence) in occurrences.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(occurrence.start.format("%a").to_string()),
            Cell::new(occurrence.start.format(DATE_TIME_FORMAT).to_string()).fg(Color::Cyan),
            Cell::new(occurrence.end.format(DATE_TIME_FORMAT).to_string()),
            Cell::new(&occurrence.title),
        ]);
    }

    println!("{table}");
}

pub fn display_options(options: &RuleOptions) {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Value", "Label"]);

    for (frequency, label) in &options.frequencies {
        table.add_row(vec![
            Cell::new("frequency"),
            Cell::new(frequency.as_str()),
            Cell::new(label),
        ]);
    }
    for weekday in &options.weekdays {
        table.add_row(vec![
            Cell::new("day_of_week"),
            Cell::new(&weekday.value),
            Cell::new(&weekday.label),
        ]);
    }
    for (week, label) in &options.week_numbers {
        table.add_row(vec![Cell::new("week_number"), Cell::new(week.code()), Cell::new(label)]);
    }
    for month in Month::all() {
        table.add_row(vec![
            Cell::new("selected_months"),
            Cell::new(month.index()),
            Cell::new(month_label(options, month)),
        ]);
    }

    println!("{table}");
}

fn month_label(options: &RuleOptions, month: Month) -> String {
    options
        .month_label(month)
        .map(str::to_string)
        .unwrap_or_else(|| month.index().to_string())
}
