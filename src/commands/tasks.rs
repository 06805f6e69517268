use super::{fetch, roles::select_role, AppContext};
use crate::{
    libs::{
        formatter::{day_heading, parse_due_input},
        messages::Message,
        navigation::Route,
        task::{
            format_timestamp, Priority, Quadrant, Recurrence, Role, Status, Task, TaskCategory, TaskDraft, TaskQuery,
            TaskUpdate,
        },
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show one task
    Show {
        /// Task ID
        id: i64,
    },
    /// Create a task
    Add(AddArgs),
    /// Edit a task interactively
    Edit {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a task completed, or reopen a completed one
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Reschedule a task onto another day, keeping its time
    Move {
        /// Task ID
        id: i64,
        /// Target day (YYYY-MM-DD)
        day: NaiveDate,
    },
}

#[derive(Debug, Args, Default)]
struct ListArgs {
    /// Role ID
    #[arg(long)]
    role: Option<i64>,
    /// not_started, in_progress or completed
    #[arg(long)]
    status: Option<Status>,
    /// high, medium or low
    #[arg(long)]
    priority: Option<Priority>,
    /// q1, q2, q3 or q4
    #[arg(long)]
    quadrant: Option<Quadrant>,
    /// Earliest due day (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest due day (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<ListArgs> for TaskQuery {
    fn from(args: ListArgs) -> Self {
        TaskQuery {
            role: args.role,
            status: args.status,
            priority: args.priority,
            quadrant: args.quadrant,
            start_date: args.from,
            end_date: args.to,
            ..TaskQuery::default()
        }
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task title; prompts for every field when omitted
    title: Option<String>,
    /// Role ID
    #[arg(long)]
    role: Option<i64>,
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    quadrant: Option<Quadrant>,
    /// Due date (YYYY-MM-DD or YYYY-MM-DD HH:MM)
    #[arg(long)]
    due: Option<String>,
}

pub async fn cmd(ctx: &AppContext, args: TasksArgs) -> Result<()> {
    let command = args.command.unwrap_or(TaskCommand::List(ListArgs::default()));
    let route = match &command {
        TaskCommand::Add(_) => Route::TaskNew,
        TaskCommand::Edit { id } => Route::TaskEdit(*id),
        _ => Route::Tasks,
    };
    ctx.enter(route).await?;

    match command {
        TaskCommand::List(list) => handle_list(ctx, list.into()).await,
        TaskCommand::Show { id } => handle_show(ctx, id).await,
        TaskCommand::Add(add) => handle_add(ctx, add).await,
        TaskCommand::Edit { id } => handle_edit(ctx, id).await,
        TaskCommand::Delete { id, yes } => handle_delete(ctx, id, yes).await,
        TaskCommand::Toggle { id } => handle_toggle(ctx, id).await,
        TaskCommand::Move { id, day } => handle_move(ctx, id, day).await,
    }
}

async fn handle_list(ctx: &AppContext, query: TaskQuery) -> Result<()> {
    let scope = ctx.scope();
    let Some(tasks) = fetch(&scope, ctx.api.tasks(&query)).await? else {
        return Ok(());
    };
    msg_print!(Message::TasksHeader, true);
    ctx.view().tasks(&tasks);
    Ok(())
}

async fn handle_show(ctx: &AppContext, id: i64) -> Result<()> {
    let scope = ctx.scope();
    if let Some(task) = fetch(&scope, ctx.api.task(id)).await? {
        ctx.view().task(&task);
    }
    Ok(())
}

async fn handle_add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let scope = ctx.scope();
    let both = async { tokio::try_join!(ctx.api.roles(), ctx.api.categories()) };
    let Some((roles, categories)) = fetch(&scope, both).await? else {
        return Ok(());
    };

    let draft = match args.title {
        Some(title) => quick_draft(&roles, title, args.role, args.priority, args.quadrant, args.due)?,
        None => prompt_draft(&roles, &categories)?,
    };

    if let Some(task) = fetch(&scope, ctx.api.create_task(&draft)).await? {
        msg_success!(Message::TaskCreated(task.title));
        ctx.navigator().navigate(Route::Tasks);
    }
    Ok(())
}

fn quick_draft(
    roles: &[Role],
    title: String,
    role: Option<i64>,
    priority: Option<Priority>,
    quadrant: Option<Quadrant>,
    due: Option<String>,
) -> Result<TaskDraft> {
    let role = match role {
        Some(role) => role,
        None => select_role(roles, None)?,
    };
    let mut draft = TaskDraft::new(title.trim(), role);
    draft.priority = priority.unwrap_or_default();
    draft.quadrant = quadrant;
    if let Some(due) = due {
        draft = draft.due_at(parse_due(&due)?);
    }
    Ok(draft)
}

fn prompt_draft(roles: &[Role], categories: &[TaskCategory]) -> Result<TaskDraft> {
    let theme = ColorfulTheme::default();
    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .interact_text()?;
    let role = select_role(roles, None)?;
    let mut draft = TaskDraft::new(title.trim(), role);

    draft.description = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .allow_empty(true)
        .interact_text()?;
    draft.category = select_category(categories, role, None)?;
    draft.status = select_status(Status::NotStarted)?;
    draft.priority = select_priority(Priority::Medium)?;
    draft.quadrant = select_quadrant(None)?;
    if let Some(due) = prompt_due(None)? {
        draft = draft.due_at(due);
        draft.recurrence = select_recurrence()?;
    }
    draft.estimated_hours = prompt_hours(Message::PromptEstimatedHours, 0.0)?;
    Ok(draft)
}

async fn handle_edit(ctx: &AppContext, id: i64) -> Result<()> {
    let scope = ctx.scope();
    let all = async { tokio::try_join!(ctx.api.task(id), ctx.api.roles(), ctx.api.categories()) };
    let Some((task, roles, categories)) = fetch(&scope, all).await? else {
        return Ok(());
    };

    let update = prompt_update(&task, &roles, &categories)?;
    if update.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    if let Some(task) = fetch(&scope, ctx.api.update_task(id, &update)).await? {
        msg_success!(Message::TaskUpdated(task.title));
        ctx.navigator().navigate(Route::Tasks);
    }
    Ok(())
}

/// Prompts for every editable field and keeps only the ones that changed.
fn prompt_update(task: &Task, roles: &[Role], categories: &[TaskCategory]) -> Result<TaskUpdate> {
    let theme = ColorfulTheme::default();
    let mut update = TaskUpdate::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .interact_text()?;
    if title.trim() != task.title {
        update.title = Some(title.trim().to_string());
    }

    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(task.description.clone())
        .allow_empty(true)
        .interact_text()?;
    if description != task.description {
        update.description = Some(description);
    }

    let role = select_role(roles, task.role)?;
    if Some(role) != task.role {
        update.role = Some(role);
    }

    let category = select_category(categories, role, task.category)?;
    if category != task.category {
        update.category = Some(category);
    }

    let status = select_status(task.status)?;
    if status != task.status {
        update = update.with_status(status);
    }

    let priority = select_priority(task.priority)?;
    if priority != task.priority {
        update.priority = Some(priority);
    }

    let quadrant = select_quadrant(task.quadrant)?;
    if quadrant != task.quadrant {
        update.quadrant = Some(quadrant);
    }

    let due = prompt_due(task.due_local())?;
    if due != task.due_local() {
        update.due_date = Some(due.map(|due| format_timestamp(&due)));
        update.scheduled_date = Some(due.map(|due| due.date().format("%Y-%m-%d").to_string()));
    }

    let estimated = prompt_hours(Message::PromptEstimatedHours, task.estimated_hours)?;
    if estimated != task.estimated_hours {
        update.estimated_hours = Some(estimated);
    }
    let actual = prompt_hours(Message::PromptActualHours, task.actual_hours)?;
    if actual != task.actual_hours {
        update.actual_hours = Some(actual);
    }

    Ok(update)
}

async fn handle_delete(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    let scope = ctx.scope();
    let Some(task) = fetch(&scope, ctx.api.task(id)).await? else {
        return Ok(());
    };

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_warning!(Message::NothingDeleted);
        return Ok(());
    }

    if fetch(&scope, ctx.api.delete_task(id)).await?.is_some() {
        msg_success!(Message::TaskDeleted(id));
    }
    Ok(())
}

async fn handle_toggle(ctx: &AppContext, id: i64) -> Result<()> {
    let scope = ctx.scope();
    let Some(outcome) = fetch(&scope, ctx.api.toggle_task_complete(id)).await? else {
        return Ok(());
    };
    if outcome.task.is_completed {
        msg_success!(Message::TaskCompleted(outcome.task.title.clone()));
    } else {
        msg_success!(Message::TaskReopened(outcome.task.title.clone()));
    }
    msg_info!(Message::CompletionRate(outcome.analytics.completion_rate));
    Ok(())
}

async fn handle_move(ctx: &AppContext, id: i64, day: NaiveDate) -> Result<()> {
    let scope = ctx.scope();
    if let Some(task) = fetch(&scope, ctx.api.move_task(id, day)).await? {
        msg_success!(Message::TaskMoved(task.title, day_heading(day)));
    }
    Ok(())
}

fn parse_due(value: &str) -> Result<NaiveDateTime> {
    match parse_due_input(value) {
        Some(due) => Ok(due),
        None => msg_bail_anyhow!(Message::InvalidDate(value.to_string())),
    }
}

fn prompt_due(current: Option<NaiveDateTime>) -> Result<Option<NaiveDateTime>> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), String> {
            if value.trim().is_empty() || parse_due_input(value).is_some() {
                Ok(())
            } else {
                Err(Message::InvalidDate(value.clone()).to_string())
            }
        });
    if let Some(current) = current {
        input = input.default(current.format("%Y-%m-%d %H:%M").to_string());
    }
    let value = input.interact_text()?;
    Ok(parse_due_input(&value))
}

fn prompt_hours(prompt: Message, current: f64) -> Result<f64> {
    let value: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(current)
        .validate_with(|value: &f64| -> Result<(), &'static str> {
            if *value >= 0.0 {
                Ok(())
            } else {
                Err("hours cannot be negative")
            }
        })
        .interact_text()?;
    Ok(value)
}

fn select_status(current: Status) -> Result<Status> {
    let options = [Status::NotStarted, Status::InProgress, Status::Completed];
    let labels: Vec<&str> = options.iter().map(|status| status.label()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskStatus.to_string())
        .items(&labels)
        .default(options.iter().position(|s| *s == current).unwrap_or(0))
        .interact()?;
    Ok(options[selection])
}

fn select_priority(current: Priority) -> Result<Priority> {
    let options = [Priority::High, Priority::Medium, Priority::Low];
    let labels: Vec<&str> = options.iter().map(|priority| priority.label()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&labels)
        .default(options.iter().position(|p| *p == current).unwrap_or(1))
        .interact()?;
    Ok(options[selection])
}

fn select_quadrant(current: Option<Quadrant>) -> Result<Option<Quadrant>> {
    let mut labels = vec!["None".to_string()];
    labels.extend(Quadrant::ALL.iter().map(|q| format!("{}: {}", q.as_str().to_uppercase(), q.label())));
    let default = current
        .and_then(|current| Quadrant::ALL.iter().position(|q| *q == current))
        .map(|i| i + 1)
        .unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskQuadrant.to_string())
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(selection.checked_sub(1).map(|i| Quadrant::ALL[i]))
}

fn select_recurrence() -> Result<Option<Recurrence>> {
    let mut labels = vec!["Never"];
    labels.extend(Recurrence::ALL.iter().map(|r| r.label()));
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskRecurrence.to_string())
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(selection.checked_sub(1).map(|i| Recurrence::ALL[i]))
}

/// Categories are scoped to a role; only those of `role` are offered.
fn select_category(categories: &[TaskCategory], role: i64, current: Option<i64>) -> Result<Option<i64>> {
    let options: Vec<&TaskCategory> = categories.iter().filter(|category| category.role == role).collect();
    if options.is_empty() {
        return Ok(None);
    }
    let mut labels = vec!["None"];
    labels.extend(options.iter().map(|category| category.name.as_str()));
    let default = current
        .and_then(|id| options.iter().position(|category| category.id == id))
        .map(|i| i + 1)
        .unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectCategory.to_string())
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(selection.checked_sub(1).map(|i| options[i].id))
}
