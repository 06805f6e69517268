use super::{fetch, AppContext};
use crate::{
    libs::{
        messages::Message,
        navigation::Route,
        task::{Role, RoleDraft},
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct RolesArgs {
    #[command(subcommand)]
    command: Option<RoleCommand>,
}

#[derive(Debug, Subcommand)]
enum RoleCommand {
    /// List roles
    List,
    /// Create a role
    Add {
        /// Role name
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename or describe a role
    Edit {
        /// Role ID
        id: i64,
    },
    /// Delete a role together with its tasks and categories
    Delete {
        /// Role ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(ctx: &AppContext, args: RolesArgs) -> Result<()> {
    ctx.enter(Route::Roles).await?;
    match args.command.unwrap_or(RoleCommand::List) {
        RoleCommand::List => handle_list(ctx).await,
        RoleCommand::Add { name, description } => handle_add(ctx, name, description).await,
        RoleCommand::Edit { id } => handle_edit(ctx, id).await,
        RoleCommand::Delete { id, yes } => handle_delete(ctx, id, yes).await,
    }
}

async fn handle_list(ctx: &AppContext) -> Result<()> {
    let scope = ctx.scope();
    let Some(roles) = fetch(&scope, ctx.api.roles()).await? else {
        return Ok(());
    };
    msg_print!(Message::RolesHeader, true);
    ctx.view().roles(&roles);
    Ok(())
}

async fn handle_add(ctx: &AppContext, name: Option<String>, description: Option<String>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptRoleName.to_string())
            .interact_text()?,
    };
    let description = match description {
        Some(description) => description,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptRoleDescription.to_string())
            .allow_empty(true)
            .interact_text()?,
    };

    let draft = RoleDraft {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
    };
    let scope = ctx.scope();
    if let Some(role) = fetch(&scope, ctx.api.create_role(&draft)).await? {
        msg_success!(Message::RoleCreated(role.name));
    }
    Ok(())
}

async fn handle_edit(ctx: &AppContext, id: i64) -> Result<()> {
    let scope = ctx.scope();
    let Some(roles) = fetch(&scope, ctx.api.roles()).await? else {
        return Ok(());
    };
    let role = find_role(&roles, id)?;

    let theme = ColorfulTheme::default();
    let name: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptRoleName.to_string())
        .default(role.name.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptRoleDescription.to_string())
        .default(role.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let draft = RoleDraft {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
    };
    if draft.name == role.name && draft.description == role.description {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }
    if let Some(role) = fetch(&scope, ctx.api.update_role(id, &draft)).await? {
        msg_success!(Message::RoleUpdated(role.name));
    }
    Ok(())
}

async fn handle_delete(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    let scope = ctx.scope();
    let Some(roles) = fetch(&scope, ctx.api.roles()).await? else {
        return Ok(());
    };
    let role = find_role(&roles, id)?;

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteRole(role.name.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_warning!(Message::NothingDeleted);
        return Ok(());
    }

    if fetch(&scope, ctx.api.delete_role(id)).await?.is_some() {
        msg_success!(Message::RoleDeleted(id));
    }
    Ok(())
}

fn find_role(roles: &[Role], id: i64) -> Result<&Role> {
    match roles.iter().find(|role| role.id == id) {
        Some(role) => Ok(role),
        None => msg_bail_anyhow!(Message::RoleNotFound(id)),
    }
}

/// Lets the user pick one of `roles`, preselecting `current` when given.
pub(crate) fn select_role(roles: &[Role], current: Option<i64>) -> Result<i64> {
    if roles.is_empty() {
        msg_bail_anyhow!(Message::NoRolesCreateFirst);
    }
    let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
    let default = current
        .and_then(|id| roles.iter().position(|role| role.id == id))
        .unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectRole.to_string())
        .items(&names)
        .default(default)
        .interact()?;
    Ok(roles[selection].id)
}
