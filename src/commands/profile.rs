use super::{fetch, AppContext};
use crate::{
    api::ProfileUpdate,
    libs::{messages::Message, navigation::Route},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Edit username, email or password
    #[arg(short, long)]
    edit: bool,
}

pub async fn cmd(ctx: &AppContext, args: ProfileArgs) -> Result<()> {
    ctx.enter(Route::Profile).await?;
    let scope = ctx.scope();

    let Some(user) = fetch(&scope, ctx.api.profile()).await? else {
        return Ok(());
    };
    ctx.session.update_user(&user)?;

    if !args.edit {
        ctx.view().profile(&user);
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    let username: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptUsername.to_string())
        .default(user.username.clone())
        .interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptEmail.to_string())
        .default(user.email.clone())
        .interact_text()?;

    let mut update = ProfileUpdate::default();
    if username.trim() != user.username {
        update.username = Some(username.trim().to_string());
    }
    if email.trim() != user.email {
        update.email = Some(email.trim().to_string());
    }

    let change_password = Confirm::with_theme(&theme)
        .with_prompt(Message::PromptChangePassword.to_string())
        .default(false)
        .interact()?;
    if change_password {
        update.current_password = Some(
            Password::with_theme(&theme)
                .with_prompt(Message::PromptCurrentPassword.to_string())
                .interact()?,
        );
        update.new_password = Some(
            Password::with_theme(&theme)
                .with_prompt(Message::PromptNewPassword.to_string())
                .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordsDoNotMatch.to_string())
                .interact()?,
        );
    }

    if update.username.is_none() && update.email.is_none() && update.new_password.is_none() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let Some(user) = fetch(&scope, ctx.api.update_profile(&update)).await? else {
        return Ok(());
    };
    ctx.session.update_user(&user)?;
    msg_success!(Message::ProfileUpdated);
    ctx.view().profile(&user);
    Ok(())
}
