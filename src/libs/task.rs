//! Task service data model.
//!
//! These types mirror the JSON the backend serves for roles, categories, tasks
//! and analytics. Wire formats are kept exactly (priority as an integer, quadrant
//! as `q1..q4`, decimal hours as either numbers or strings) so that records can
//! be round-tripped through partial updates without loss.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used for tasks that carry no role name.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Serialized as the backend's integer codes: 1 high, 2 medium, 3 low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn code(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(format!("invalid priority {}, expected 1, 2 or 3", other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.code()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Eisenhower matrix quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1",
            Quadrant::Q2 => "q2",
            Quadrant::Q3 => "q3",
            Quadrant::Q4 => "q4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "Urgent & Important",
            Quadrant::Q2 => "Not Urgent & Important",
            Quadrant::Q3 => "Urgent & Not Important",
            Quadrant::Q4 => "Not Urgent & Not Important",
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Quadrant::Q1 | Quadrant::Q3)
    }

    pub fn is_important(&self) -> bool {
        matches!(self, Quadrant::Q1 | Quadrant::Q2)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 3] = [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly];

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "not_started" | "todo" => Ok(Status::NotStarted),
            "in_progress" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Accepts the names (`high`) as well as the wire codes (`1`).
impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "1" => Ok(Priority::High),
            "medium" | "2" => Ok(Priority::Medium),
            "low" | "3" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "q1" | "1" => Ok(Quadrant::Q1),
            "q2" | "2" => Ok(Quadrant::Q2),
            "q3" | "3" => Ok(Quadrant::Q3),
            "q4" | "4" => Ok(Quadrant::Q4),
            other => Err(format!("unknown quadrant '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
}

/// Writable fields of a role.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub role: i64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub color: String,
    pub role: i64,
}

fn default_color() -> String {
    "#000000".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "blank_quadrant")]
    pub quadrant: Option<Quadrant>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub role: Option<i64>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default, deserialize_with = "decimal_hours")]
    pub estimated_hours: f64,
    #[serde(default, deserialize_with = "decimal_hours")]
    pub actual_hours: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Task {
    /// Due date in local time, or `None` when unset or unparseable.
    pub fn due_local(&self) -> Option<NaiveDateTime> {
        self.due_date.as_deref().and_then(parse_timestamp)
    }

    /// Calendar day the task is due on, in local time.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_local().map(|due| due.date())
    }

    /// Role label used for grouping; empty or missing names collapse to [`UNASSIGNED_ROLE`].
    pub fn role_label(&self) -> &str {
        match self.role_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNASSIGNED_ROLE,
        }
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.is_completed && self.due_local().is_some_and(|due| due < now)
    }
}

/// Parses the timestamp shapes the backend and the planner produce.
///
/// Offsets are converted to local time; naive values are taken as local already.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(|d| d.and_time(NaiveTime::MIN))
}

/// Formats a local timestamp the way the planner sends due dates.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backend stores an unset quadrant as either null or `""`.
fn blank_quadrant<'de, D>(deserializer: D) -> Result<Option<Quadrant>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Decimal fields arrive as `"1.50"` from the backend but as numbers from older clients.
fn decimal_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hours {
        Number(f64),
        Text(String),
    }

    match Option::<Hours>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Hours::Number(n)) => Ok(n),
        Some(Hours::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Hours::Text(s)) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub role: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    pub quadrant: Option<Quadrant>,
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

impl TaskDraft {
    pub fn new(title: &str, role: i64) -> Self {
        Self {
            title: title.to_string(),
            role,
            ..Self::default()
        }
    }

    /// Schedules the draft on a local timestamp, keeping `scheduled_date` on the same day.
    pub fn due_at(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(format_timestamp(&due));
        self.scheduled_date = Some(due.date().format("%Y-%m-%d").to_string());
        self
    }
}

/// Partial task update sent with PATCH.
///
/// Nullable fields use `Option<Option<_>>`: the outer `None` leaves the field
/// untouched, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Option<Quadrant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
}

impl TaskUpdate {
    /// Sets `status` and the completion flag that must agree with it.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self.is_completed = Some(status == Status::Completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Keeps `is_completed` in line with an explicitly set `status`.
    pub(crate) fn reconcile(mut self) -> Self {
        if let Some(status) = self.status {
            self.is_completed = Some(status == Status::Completed);
        }
        self
    }
}

/// Server-side task list filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub ordering: String,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            role: None,
            status: None,
            priority: None,
            quadrant: None,
            start_date: None,
            end_date: None,
            ordering: "due_date".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriorityCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuadrantCounts {
    pub q1: u64,
    pub q2: u64,
    pub q3: u64,
    pub q4: u64,
}

impl QuadrantCounts {
    pub fn get(&self, quadrant: Quadrant) -> u64 {
        match quadrant {
            Quadrant::Q1 => self.q1,
            Quadrant::Q2 => self.q2,
            Quadrant::Q3 => self.q3,
            Quadrant::Q4 => self.q4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct QuadrantPercentages {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl QuadrantPercentages {
    pub fn get(&self, quadrant: Quadrant) -> f64 {
        match quadrant {
            Quadrant::Q1 => self.q1,
            Quadrant::Q2 => self.q2,
            Quadrant::Q3 => self.q3,
            Quadrant::Q4 => self.q4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCount {
    #[serde(rename = "role__name")]
    pub role_name: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    pub count: u64,
}

/// Aggregate counts served by the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskAnalytics {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub in_progress_tasks: u64,
    pub overdue_tasks: u64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub by_priority: PriorityCounts,
    #[serde(default)]
    pub by_role: Vec<RoleCount>,
    #[serde(default)]
    pub by_quadrant: QuadrantCounts,
    #[serde(default)]
    pub quadrant_percentages: QuadrantPercentages,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
