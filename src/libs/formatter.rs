//! Display formatting for task fields.
//!
//! Every table and planner view renders dates, priorities and percentages
//! through these helpers so the wording stays identical across views:
//!
//! - priority → "High Priority" / "Medium Priority" / "Low Priority"
//! - due date → "Mon, Jun 3 10:00", or "-" when unset
//! - day heading → "Monday, Jun 3"
//! - percentage → "33.3%"

use super::task::{Priority, Quadrant, Task};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub fn priority_text(priority: Priority) -> String {
    format!("{} Priority", priority.label())
}

pub fn quadrant_text(quadrant: Option<Quadrant>) -> String {
    match quadrant {
        Some(quadrant) => format!("{} ({})", quadrant.as_str().to_uppercase(), quadrant.label()),
        None => "-".to_string(),
    }
}

pub fn format_due(task: &Task) -> String {
    match task.due_local() {
        Some(due) => format_due_local(&due),
        None => "-".to_string(),
    }
}

fn format_due_local(due: &NaiveDateTime) -> String {
    if due.time() == NaiveTime::MIN {
        due.format("%a, %b %-d").to_string()
    } else {
        due.format("%a, %b %-d %H:%M").to_string()
    }
}

pub fn day_heading(day: NaiveDate) -> String {
    day.format("%A, %b %-d").to_string()
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_hours(value: f64) -> String {
    format!("{:.2}", value)
}

/// Checkbox-style completion marker.
pub fn completion_mark(task: &Task) -> &'static str {
    if task.is_completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Parses user input for a due date: `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or a bare day.
pub fn parse_due_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(due) = NaiveDateTime::parse_from_str(value, format) {
            return Some(due);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(|day| day.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_labels() {
        assert_eq!(priority_text(Priority::High), "High Priority");
        assert_eq!(priority_text(Priority::Low), "Low Priority");
    }

    #[test]
    fn parses_due_input_variants() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(parse_due_input("2024-06-03"), Some(day.and_time(NaiveTime::MIN)));
        assert_eq!(
            parse_due_input("2024-06-03 10:30"),
            Some(day.and_hms_opt(10, 30, 0).unwrap())
        );
        assert_eq!(parse_due_input("tomorrow"), None);
    }

    #[test]
    fn day_heading_uses_full_weekday() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(day_heading(day), "Monday, Jun 3");
    }
}
