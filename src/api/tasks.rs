//! Roles, tasks, categories and analytics endpoints.

use super::{Access, Api};
use crate::libs::error::ApiError;
use crate::libs::task::{
    format_timestamp, CategoryDraft, Role, RoleDraft, Status, Task, TaskAnalytics, TaskCategory, TaskDraft, TaskQuery,
    TaskUpdate,
};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

const ROLES_URL: &str = "tasks/roles/";
const TASKS_URL: &str = "tasks/tasks/";
const ANALYTICS_URL: &str = "tasks/tasks/analytics/";
const CATEGORIES_URL: &str = "tasks/categories/";

/// Result of toggling a task: the updated task and analytics fetched after the write.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub task: Task,
    pub analytics: TaskAnalytics,
}

/// Patch that flips a task's completion, deriving `status` and `completed_at`.
pub fn completion_patch(task: &Task, now: DateTime<Utc>) -> TaskUpdate {
    let completed = !task.is_completed;
    TaskUpdate {
        status: Some(if completed { Status::Completed } else { Status::NotStarted }),
        is_completed: Some(completed),
        completed_at: Some(completed.then(|| now.to_rfc3339_opts(SecondsFormat::Millis, true))),
        ..TaskUpdate::default()
    }
}

fn item_url(collection: &str, id: i64) -> String {
    format!("{}{}/", collection, id)
}

impl Api {
    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(method, path, Access::Authenticated).json(body);
        self.fetch(builder, Access::Authenticated).await
    }

    // Roles

    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.fetch_list(ROLES_URL).await
    }

    pub async fn create_role(&self, role: &RoleDraft) -> Result<Role, ApiError> {
        self.send_json(Method::POST, ROLES_URL, role).await
    }

    pub async fn update_role(&self, id: i64, role: &RoleDraft) -> Result<Role, ApiError> {
        self.send_json(Method::PUT, &item_url(ROLES_URL, id), role).await
    }

    pub async fn delete_role(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_url(ROLES_URL, id)).await
    }

    // Tasks

    pub async fn tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        let builder = self.request(Method::GET, TASKS_URL, Access::Authenticated).query(query);
        let listing: super::Listing<Task> = self.fetch(builder, Access::Authenticated).await?;
        Ok(listing.into_vec())
    }

    pub async fn task(&self, id: i64) -> Result<Task, ApiError> {
        let builder = self.request(Method::GET, &item_url(TASKS_URL, id), Access::Authenticated);
        self.fetch(builder, Access::Authenticated).await
    }

    pub async fn create_task(&self, task: &TaskDraft) -> Result<Task, ApiError> {
        if task.title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".to_string()));
        }
        self.send_json(Method::POST, TASKS_URL, task).await
    }

    /// Partial update. A `status` change always carries the matching `is_completed`.
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
        let update = update.clone().reconcile();
        self.send_json(Method::PATCH, &item_url(TASKS_URL, id), &update).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_url(TASKS_URL, id)).await
    }

    /// Flips completion with a read-modify-write and returns fresh analytics with the task.
    ///
    /// Not protected against concurrent toggles of the same task: the last write wins.
    pub async fn toggle_task_complete(&self, id: i64) -> Result<ToggleOutcome, ApiError> {
        let current = self.task(id).await?;
        let patch = completion_patch(&current, Utc::now());
        let task: Task = self.send_json(Method::PATCH, &item_url(TASKS_URL, id), &patch).await?;
        let analytics = self.analytics().await?;
        Ok(ToggleOutcome { task, analytics })
    }

    /// Reschedules a task onto `day`, keeping its time of day.
    pub async fn move_task(&self, id: i64, day: NaiveDate) -> Result<Task, ApiError> {
        let current = self.task(id).await?;
        let time = current.due_local().map(|due| due.time()).unwrap_or(NaiveTime::MIN);
        let update = TaskUpdate {
            due_date: Some(Some(format_timestamp(&day.and_time(time)))),
            scheduled_date: Some(Some(day.format("%Y-%m-%d").to_string())),
            ..TaskUpdate::default()
        };
        self.update_task(id, &update).await
    }

    pub async fn analytics(&self) -> Result<TaskAnalytics, ApiError> {
        let builder = self.request(Method::GET, ANALYTICS_URL, Access::Authenticated);
        self.fetch(builder, Access::Authenticated).await
    }

    // Categories

    pub async fn categories(&self) -> Result<Vec<TaskCategory>, ApiError> {
        self.fetch_list(CATEGORIES_URL).await
    }

    pub async fn create_category(&self, category: &CategoryDraft) -> Result<TaskCategory, ApiError> {
        self.send_json(Method::POST, CATEGORIES_URL, category).await
    }

    pub async fn update_category(&self, id: i64, category: &CategoryDraft) -> Result<TaskCategory, ApiError> {
        self.send_json(Method::PUT, &item_url(CATEGORIES_URL, id), category).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_url(CATEGORIES_URL, id)).await
    }
}
