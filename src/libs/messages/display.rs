//! Display implementation for application messages.
//!
//! The single source of the text shown to users. Messages with parameters
//! interpolate them here so call sites only pick the variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleApi => "API settings".to_string(),
            Message::ConfigModulePlanner => "Planner settings".to_string(),

            // === SESSION MESSAGES ===
            Message::LoginRequired(view) => format!("Please log in to open {}", view),
            Message::LoggedIn(username) => format!("Welcome back, {}!", username),
            Message::LoggedInAs(username, email) => format!("Logged in as {} <{}>", username, email),
            Message::LoggedOut => "You have been logged out.".to_string(),
            Message::Registered(username) => format!("Account created. Welcome, {}!", username),
            Message::LoginFailed(error) => format!("Login failed: {}", error),
            Message::RegisterFailed(error) => format!("Registration failed: {}", error),
            Message::NotLoggedIn => "You are not logged in.".to_string(),
            Message::ResumingView(view) => format!("Continuing to {}", view),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),

            // === ROLE MESSAGES ===
            Message::RolesHeader => "Roles".to_string(),
            Message::NoRoles => "No roles yet.".to_string(),
            Message::NoRolesCreateFirst => "Create a role first with `lifescope roles add`.".to_string(),
            Message::RoleCreated(name) => format!("Role '{}' created", name),
            Message::RoleUpdated(name) => format!("Role '{}' updated", name),
            Message::RoleDeleted(id) => format!("Role {} deleted", id),
            Message::RoleNotFound(id) => format!("Role {} not found", id),
            Message::ConfirmDeleteRole(name) => {
                format!("Delete role '{}'? All of its tasks and categories are deleted too.", name)
            }

            // === CATEGORY MESSAGES ===
            Message::CategoriesHeader => "Categories".to_string(),
            Message::NoCategories => "No categories yet.".to_string(),
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated", name),
            Message::CategoryDeleted(id) => format!("Category {} deleted", id),
            Message::CategoryNotFound(id) => format!("Category {} not found", id),
            Message::InvalidColor(value) => format!("'{}' is not a hex color like #1f6feb", value),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),

            // === TASK MESSAGES ===
            Message::TasksHeader => "Tasks".to_string(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskCompleted(title) => format!("Task '{}' completed", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskMoved(title, day) => format!("Task '{}' moved to {}", title, day),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::CompletionRate(rate) => format!("Completion rate: {:.1}%", rate),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM", value),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::NothingDeleted => "Nothing was deleted".to_string(),

            // === PLANNER MESSAGES ===
            Message::WeekHeader(first, last) => format!("Week of {} - {}", first, last),
            Message::NoTasksForDay => "No tasks".to_string(),
            Message::DueTodayHeader => "Due Today".to_string(),
            Message::NoTasksDueToday => "No tasks due today".to_string(),
            Message::MatrixHeader => "Eisenhower Matrix".to_string(),
            Message::NoTasksInQuadrant => "No tasks".to_string(),
            Message::DashboardHeader => "Dashboard".to_string(),
            Message::LocalAnalyticsNote => "Analytics computed locally from the task list.".to_string(),

            // === PROFILE MESSAGES ===
            Message::ProfileHeader => "Profile".to_string(),
            Message::ProfileUpdated => "Profile updated".to_string(),

            // === THEME MESSAGES ===
            Message::ThemeCurrent(mode) => format!("Current theme: {}", mode),
            Message::ThemeChanged(mode) => format!("Theme switched to {}", mode),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptApiUrl => "Enter the LifeScope API URL".to_string(),
            Message::PromptWeekStart => "First day of the week".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Confirm password".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptCurrentPassword => "Current password".to_string(),
            Message::PromptNewPassword => "New password".to_string(),
            Message::PromptChangePassword => "Change password?".to_string(),
            Message::PromptRoleName => "Role name".to_string(),
            Message::PromptRoleDescription => "Description (optional)".to_string(),
            Message::PromptSelectRole => "Role".to_string(),
            Message::PromptCategoryName => "Category name".to_string(),
            Message::PromptCategoryDescription => "Description (optional)".to_string(),
            Message::PromptCategoryColor => "Color (hex)".to_string(),
            Message::PromptSelectCategory => "Category".to_string(),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskStatus => "Status".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskQuadrant => "Quadrant".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD HH:MM, empty for none)".to_string(),
            Message::PromptTaskRecurrence => "Repeat".to_string(),
            Message::PromptEstimatedHours => "Estimated hours".to_string(),
            Message::PromptActualHours => "Actual hours".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::RequestFailed(error) => format!("Request failed: {}", error),
            Message::ViewCancelled => "Cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
