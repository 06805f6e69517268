use super::{fetch, roles::select_role, AppContext};
use crate::{
    libs::{
        messages::Message,
        navigation::Route,
        task::{CategoryDraft, TaskCategory},
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List categories
    List,
    /// Create a category under a role
    Add,
    /// Edit a category
    Edit {
        /// Category ID
        id: i64,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(ctx: &AppContext, args: CategoriesArgs) -> Result<()> {
    ctx.enter(Route::Roles).await?;
    match args.command.unwrap_or(CategoryCommand::List) {
        CategoryCommand::List => handle_list(ctx).await,
        CategoryCommand::Add => handle_add(ctx).await,
        CategoryCommand::Edit { id } => handle_edit(ctx, id).await,
        CategoryCommand::Delete { id, yes } => handle_delete(ctx, id, yes).await,
    }
}

async fn handle_list(ctx: &AppContext) -> Result<()> {
    let scope = ctx.scope();
    let both = async { tokio::try_join!(ctx.api.categories(), ctx.api.roles()) };
    let Some((categories, roles)) = fetch(&scope, both).await? else {
        return Ok(());
    };
    msg_print!(Message::CategoriesHeader, true);
    ctx.view().categories(&categories, &roles);
    Ok(())
}

async fn handle_add(ctx: &AppContext) -> Result<()> {
    let scope = ctx.scope();
    let Some(roles) = fetch(&scope, ctx.api.roles()).await? else {
        return Ok(());
    };
    let role = select_role(&roles, None)?;
    let draft = prompt_draft(role, None)?;

    if let Some(category) = fetch(&scope, ctx.api.create_category(&draft)).await? {
        msg_success!(Message::CategoryCreated(category.name));
    }
    Ok(())
}

async fn handle_edit(ctx: &AppContext, id: i64) -> Result<()> {
    let scope = ctx.scope();
    let both = async { tokio::try_join!(ctx.api.categories(), ctx.api.roles()) };
    let Some((categories, roles)) = fetch(&scope, both).await? else {
        return Ok(());
    };
    let category = find_category(&categories, id)?;
    let role = select_role(&roles, Some(category.role))?;
    let draft = prompt_draft(role, Some(category))?;

    if draft.name == category.name
        && draft.description == category.description
        && draft.color == category.color
        && draft.role == category.role
    {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }
    if let Some(category) = fetch(&scope, ctx.api.update_category(id, &draft)).await? {
        msg_success!(Message::CategoryUpdated(category.name));
    }
    Ok(())
}

async fn handle_delete(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    let scope = ctx.scope();
    let Some(categories) = fetch(&scope, ctx.api.categories()).await? else {
        return Ok(());
    };
    let category = find_category(&categories, id)?;

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(category.name.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_warning!(Message::NothingDeleted);
        return Ok(());
    }

    if fetch(&scope, ctx.api.delete_category(id)).await?.is_some() {
        msg_success!(Message::CategoryDeleted(id));
    }
    Ok(())
}

fn prompt_draft(role: i64, current: Option<&TaskCategory>) -> Result<CategoryDraft> {
    let theme = ColorfulTheme::default();
    let mut name = Input::<String>::with_theme(&theme).with_prompt(Message::PromptCategoryName.to_string());
    let mut description = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptCategoryDescription.to_string())
        .allow_empty(true);
    let mut color = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptCategoryColor.to_string())
        .validate_with(|value: &String| -> Result<(), String> {
            if is_hex_color(value) {
                Ok(())
            } else {
                Err(Message::InvalidColor(value.clone()).to_string())
            }
        });

    match current {
        Some(category) => {
            name = name.default(category.name.clone());
            description = description.default(category.description.clone());
            color = color.default(category.color.clone());
        }
        None => color = color.default("#000000".to_string()),
    }

    Ok(CategoryDraft {
        name: name.interact_text()?.trim().to_string(),
        description: description.interact_text()?.trim().to_string(),
        color: color.interact_text()?.trim().to_string(),
        role,
    })
}

fn is_hex_color(value: &str) -> bool {
    let value = value.trim();
    value.len() == 7 && value.starts_with('#') && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn find_category(categories: &[TaskCategory], id: i64) -> Result<&TaskCategory> {
    match categories.iter().find(|category| category.id == id) {
        Some(category) => Ok(category),
        None => msg_bail_anyhow!(Message::CategoryNotFound(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#1a2B3c"));
        assert!(!is_hex_color("1a2b3c"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#12345g"));
    }
}
