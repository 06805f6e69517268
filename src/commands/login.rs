use super::AppContext;
use crate::{
    libs::{messages::Message, navigation::Route, session::LoginCredentials, session::Session},
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email; prompted for when omitted
    #[arg(short, long)]
    email: Option<String>,
}

pub async fn cmd(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    ctx.navigator().navigate(Route::Login);
    interactive(ctx, args.email).await?;
    ctx.navigator().resume();
    Ok(())
}

/// Prompts for credentials and establishes a session.
pub async fn interactive(ctx: &AppContext, email: Option<String>) -> Result<Session> {
    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let credentials = LoginCredentials::new(email.trim(), &password);
    match ctx.session.login(&ctx.api, &credentials).await {
        Ok(session) => {
            msg_success!(Message::LoggedIn(session.user.username.clone()));
            Ok(session)
        }
        Err(e) => Err(msg_error_anyhow!(Message::LoginFailed(e.to_string()))),
    }
}
