use super::aggregation::{DayRoleGroups, QuadrantGroups, RoleGroups};
use super::formatter::{
    completion_mark, day_heading, format_due, format_hours, format_percentage, priority_text, quadrant_text,
};
use super::messages::Message;
use super::session::User;
use super::task::{Quadrant, Role, Task, TaskAnalytics, TaskCategory};
use super::theme::ThemeMode;
use crate::msg_print;
use prettytable::{format, Cell, Row, Table};

/// Renders tables for every view, with header cells styled by the active theme.
pub struct View {
    theme: ThemeMode,
}

impl View {
    pub fn new(theme: ThemeMode) -> Self {
        Self { theme }
    }

    fn table(&self, titles: &[&str]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        let style = self.theme.header_style();
        table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t).style_spec(style)).collect()));
        table
    }

    pub fn tasks(&self, tasks: &[Task]) {
        if tasks.is_empty() {
            msg_print!(Message::NoTasksFound);
            return;
        }
        let mut table = self.table(&["", "ID", "TITLE", "ROLE", "PRIORITY", "QUADRANT", "STATUS", "DUE"]);
        for task in tasks {
            table.add_row(Row::new(vec![
                Cell::new(completion_mark(task)),
                Cell::new(&task.id.to_string()),
                Cell::new(&task.title),
                Cell::new(task.role_label()),
                Cell::new(&priority_text(task.priority)),
                Cell::new(&quadrant_text(task.quadrant)),
                Cell::new(task.status.label()),
                Cell::new(&format_due(task)),
            ]));
        }
        table.printstd();
    }

    pub fn task(&self, task: &Task) {
        let mut table = self.table(&["FIELD", "VALUE"]);
        let rows = [
            ("ID", task.id.to_string()),
            ("Title", task.title.clone()),
            ("Description", task.description.clone()),
            ("Role", task.role_label().to_string()),
            ("Category", task.category_name.clone().unwrap_or_else(|| "-".to_string())),
            ("Status", task.status.label().to_string()),
            ("Priority", priority_text(task.priority)),
            ("Quadrant", quadrant_text(task.quadrant)),
            ("Due", format_due(task)),
            ("Completed", completion_mark(task).to_string()),
            ("Estimated hours", format_hours(task.estimated_hours)),
            ("Actual hours", format_hours(task.actual_hours)),
        ];
        for (field, value) in rows {
            table.add_row(Row::new(vec![Cell::new(field), Cell::new(&value)]));
        }
        table.printstd();
    }

    pub fn roles(&self, roles: &[Role]) {
        if roles.is_empty() {
            msg_print!(Message::NoRoles);
            return;
        }
        let mut table = self.table(&["ID", "NAME", "DESCRIPTION"]);
        for role in roles {
            table.add_row(Row::new(vec![
                Cell::new(&role.id.to_string()),
                Cell::new(&role.name),
                Cell::new(&role.description),
            ]));
        }
        table.printstd();
    }

    pub fn categories(&self, categories: &[TaskCategory], roles: &[Role]) {
        if categories.is_empty() {
            msg_print!(Message::NoCategories);
            return;
        }
        let mut table = self.table(&["ID", "NAME", "ROLE", "COLOR", "DESCRIPTION"]);
        for category in categories {
            let role = roles
                .iter()
                .find(|r| r.id == category.role)
                .map(|r| r.name.as_str())
                .unwrap_or("-");
            table.add_row(Row::new(vec![
                Cell::new(&category.id.to_string()),
                Cell::new(&category.name),
                Cell::new(role),
                Cell::new(&category.color),
                Cell::new(&category.description),
            ]));
        }
        table.printstd();
    }

    /// One section per day, tasks grouped under their role.
    pub fn weekly(&self, days: &[chrono::NaiveDate], groups: &DayRoleGroups<'_>) {
        for day in days {
            msg_print!(day_heading(*day), true);
            match groups.get(day) {
                Some(roles) if !roles.is_empty() => self.role_groups(roles),
                _ => msg_print!(Message::NoTasksForDay),
            }
        }
    }

    pub fn today(&self, groups: &RoleGroups<'_>) {
        msg_print!(Message::DueTodayHeader, true);
        if groups.is_empty() {
            msg_print!(Message::NoTasksDueToday);
            return;
        }
        self.role_groups(groups);
    }

    fn role_groups(&self, groups: &RoleGroups<'_>) {
        let mut table = self.table(&["ROLE", "", "ID", "TITLE", "PRIORITY", "DUE"]);
        for (role, tasks) in groups {
            for (i, task) in tasks.iter().enumerate() {
                let label = if i == 0 { role.as_str() } else { "" };
                table.add_row(Row::new(vec![
                    Cell::new(label),
                    Cell::new(completion_mark(task)),
                    Cell::new(&task.id.to_string()),
                    Cell::new(&task.title),
                    Cell::new(&priority_text(task.priority)),
                    Cell::new(&format_due(task)),
                ]));
            }
        }
        table.printstd();
    }

    pub fn matrix(&self, groups: &QuadrantGroups<'_>) {
        msg_print!(Message::MatrixHeader, true);
        for (quadrant, tasks) in groups.iter() {
            msg_print!(format!("{} ({})", quadrant_heading(quadrant), tasks.len()), true);
            if tasks.is_empty() {
                msg_print!(Message::NoTasksInQuadrant);
                continue;
            }
            let mut table = self.table(&["", "ID", "TITLE", "ROLE", "PRIORITY", "DUE"]);
            for task in tasks {
                table.add_row(Row::new(vec![
                    Cell::new(completion_mark(task)),
                    Cell::new(&task.id.to_string()),
                    Cell::new(&task.title),
                    Cell::new(task.role_label()),
                    Cell::new(&priority_text(task.priority)),
                    Cell::new(&format_due(task)),
                ]));
            }
            table.printstd();
        }
    }

    pub fn analytics(&self, analytics: &TaskAnalytics) {
        msg_print!(Message::DashboardHeader, true);

        let mut totals = self.table(&["TOTAL", "COMPLETED", "IN PROGRESS", "OVERDUE", "COMPLETION"]);
        totals.add_row(Row::new(vec![
            Cell::new(&analytics.total_tasks.to_string()),
            Cell::new(&analytics.completed_tasks.to_string()),
            Cell::new(&analytics.in_progress_tasks.to_string()),
            Cell::new(&analytics.overdue_tasks.to_string()),
            Cell::new(&format_percentage(analytics.completion_rate)),
        ]));
        totals.printstd();

        let mut quadrants = self.table(&["QUADRANT", "TASKS", "SHARE"]);
        for quadrant in Quadrant::ALL {
            quadrants.add_row(Row::new(vec![
                Cell::new(&quadrant_heading(quadrant)),
                Cell::new(&analytics.by_quadrant.get(quadrant).to_string()),
                Cell::new(&format_percentage(analytics.quadrant_percentages.get(quadrant))),
            ]));
        }
        quadrants.printstd();

        let mut priorities = self.table(&["PRIORITY", "TASKS"]);
        for (label, count) in [
            ("High", analytics.by_priority.high),
            ("Medium", analytics.by_priority.medium),
            ("Low", analytics.by_priority.low),
        ] {
            priorities.add_row(Row::new(vec![Cell::new(label), Cell::new(&count.to_string())]));
        }
        priorities.printstd();

        if !analytics.by_role.is_empty() {
            let mut roles = self.table(&["ROLE", "TASKS"]);
            for entry in &analytics.by_role {
                roles.add_row(Row::new(vec![
                    Cell::new(entry.role_name.as_deref().unwrap_or("-")),
                    Cell::new(&entry.count.to_string()),
                ]));
            }
            roles.printstd();
        }
    }

    pub fn profile(&self, user: &User) {
        msg_print!(Message::ProfileHeader, true);
        let mut table = self.table(&["ID", "USERNAME", "EMAIL", "THEME"]);
        table.add_row(Row::new(vec![
            Cell::new(&user.id.to_string()),
            Cell::new(&user.username),
            Cell::new(&user.email),
            Cell::new(self.theme.as_str()),
        ]));
        table.printstd();
    }
}

fn quadrant_heading(quadrant: Quadrant) -> String {
    format!("{}: {}", quadrant.as_str().to_uppercase(), quadrant.label())
}
