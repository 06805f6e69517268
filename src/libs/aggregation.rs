//! View derivations over an already fetched task list.
//!
//! Every function here is pure: it borrows the input, never mutates it, and is
//! recomputed from the authoritative list whenever a view renders. Grouping is
//! stable, so tasks keep their input order inside each bucket.
//!
//! A task without a (parseable) due date never shows up in a day-keyed or
//! "today" grouping, whatever its status.

use super::task::{
    PriorityCounts, Priority, Quadrant, QuadrantCounts, QuadrantPercentages, RoleCount, Status, Task, TaskAnalytics,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First day of the planner week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Tasks keyed by role label, each bucket in input order.
pub type RoleGroups<'a> = BTreeMap<String, Vec<&'a Task>>;

/// Tasks keyed by calendar day, then by role label.
pub type DayRoleGroups<'a> = BTreeMap<NaiveDate, RoleGroups<'a>>;

pub fn week_start(date: NaiveDate, start: WeekStart) -> NaiveDate {
    let offset = match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(offset))
}

pub fn week_end(date: NaiveDate, start: WeekStart) -> NaiveDate {
    week_start(date, start) + Duration::days(6)
}

/// The seven days of the week containing `date`.
pub fn week_days(date: NaiveDate, start: WeekStart) -> Vec<NaiveDate> {
    let first = week_start(date, start);
    (0..7).map(|i| first + Duration::days(i)).collect()
}

/// Groups the tasks due within `[week_start(range_start), week_end(range_end)]`
/// by day and then by role.
pub fn group_by_day_and_role(
    tasks: &[Task],
    range_start: NaiveDate,
    range_end: NaiveDate,
    start: WeekStart,
) -> DayRoleGroups<'_> {
    let first = week_start(range_start, start);
    let last = week_end(range_end, start);

    let mut groups = DayRoleGroups::new();
    for task in tasks {
        let Some(day) = task.due_day() else { continue };
        if day < first || day > last {
            continue;
        }
        groups
            .entry(day)
            .or_default()
            .entry(task.role_label().to_string())
            .or_default()
            .push(task);
    }
    groups
}

/// Role grouping restricted to tasks due on `today` (local calendar day).
pub fn group_by_role_for_today(tasks: &[Task], today: NaiveDate) -> RoleGroups<'_> {
    let mut groups = RoleGroups::new();
    for task in tasks.iter().filter(|task| task.due_day() == Some(today)) {
        groups.entry(task.role_label().to_string()).or_default().push(task);
    }
    groups
}

/// Tasks due on a single day, in input order.
pub fn tasks_for_day(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.due_day() == Some(day)).collect()
}

/// Exactly four buckets. Tasks without a quadrant are left out of all of them.
#[derive(Debug, Default, PartialEq)]
pub struct QuadrantGroups<'a> {
    pub q1: Vec<&'a Task>,
    pub q2: Vec<&'a Task>,
    pub q3: Vec<&'a Task>,
    pub q4: Vec<&'a Task>,
}

impl<'a> QuadrantGroups<'a> {
    pub fn get(&self, quadrant: Quadrant) -> &[&'a Task] {
        match quadrant {
            Quadrant::Q1 => &self.q1,
            Quadrant::Q2 => &self.q2,
            Quadrant::Q3 => &self.q3,
            Quadrant::Q4 => &self.q4,
        }
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut Vec<&'a Task> {
        match quadrant {
            Quadrant::Q1 => &mut self.q1,
            Quadrant::Q2 => &mut self.q2,
            Quadrant::Q3 => &mut self.q3,
            Quadrant::Q4 => &mut self.q4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[&'a Task])> + '_ {
        Quadrant::ALL.into_iter().map(move |quadrant| (quadrant, self.get(quadrant)))
    }

    pub fn len(&self) -> usize {
        self.q1.len() + self.q2.len() + self.q3.len() + self.q4.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_by_quadrant(tasks: &[Task]) -> QuadrantGroups<'_> {
    let mut groups = QuadrantGroups::default();
    for task in tasks {
        if let Some(quadrant) = task.quadrant {
            groups.bucket_mut(quadrant).push(task);
        }
    }
    groups
}

/// Share of `total`, in percent rounded to one decimal; zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Local counterpart of the analytics endpoint, computed from a task list.
///
/// Percentages are taken over the total task count; an empty list yields zeros.
pub fn compute_analytics_from_tasks(tasks: &[Task], now: NaiveDateTime) -> TaskAnalytics {
    let total = tasks.len() as u64;
    let count = |predicate: fn(&Task) -> bool| tasks.iter().filter(|task| predicate(task)).count() as u64;

    let completed = count(|task| task.is_completed);
    let by_priority = PriorityCounts {
        high: count(|task| task.priority == Priority::High),
        medium: count(|task| task.priority == Priority::Medium),
        low: count(|task| task.priority == Priority::Low),
    };
    let by_quadrant = QuadrantCounts {
        q1: count(|task| task.quadrant == Some(Quadrant::Q1)),
        q2: count(|task| task.quadrant == Some(Quadrant::Q2)),
        q3: count(|task| task.quadrant == Some(Quadrant::Q3)),
        q4: count(|task| task.quadrant == Some(Quadrant::Q4)),
    };
    let quadrant_percentages = QuadrantPercentages {
        q1: percentage(by_quadrant.q1, total),
        q2: percentage(by_quadrant.q2, total),
        q3: percentage(by_quadrant.q3, total),
        q4: percentage(by_quadrant.q4, total),
    };

    TaskAnalytics {
        total_tasks: total,
        completed_tasks: completed,
        in_progress_tasks: count(|task| task.status == Status::InProgress),
        overdue_tasks: tasks.iter().filter(|task| task.is_overdue(now)).count() as u64,
        completion_rate: percentage(completed, total),
        by_priority,
        by_role: count_by_role(tasks),
        by_quadrant,
        quadrant_percentages,
        tasks: tasks.to_vec(),
    }
}

/// Per-role counts in first-seen order; tasks without a role name are skipped.
fn count_by_role(tasks: &[Task]) -> Vec<RoleCount> {
    let mut counts: Vec<RoleCount> = Vec::new();
    for task in tasks {
        let Some(name) = task.role_name.as_deref().filter(|name| !name.trim().is_empty()) else {
            continue;
        };
        match counts.iter_mut().find(|entry| entry.role_name.as_deref() == Some(name)) {
            Some(entry) => entry.count += 1,
            None => counts.push(RoleCount {
                role_name: Some(name.to_string()),
                role_id: task.role,
                count: 1,
            }),
        }
    }
    counts
}
