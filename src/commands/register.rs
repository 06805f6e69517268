use super::AppContext;
use crate::{
    libs::{messages::Message, navigation::Route, session::RegisterData},
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    username: Option<String>,
    #[arg(short, long)]
    email: Option<String>,
}

pub async fn cmd(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    ctx.navigator().navigate(Route::Register);
    let theme = ColorfulTheme::default();

    let username = match args.username {
        Some(username) => username,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;
    let password2 = Password::with_theme(&theme)
        .with_prompt(Message::PromptPasswordConfirm.to_string())
        .interact()?;

    let data = RegisterData {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password,
        password2,
    };

    match ctx.session.register(&ctx.api, &data).await {
        Ok(session) => {
            msg_success!(Message::Registered(session.user.username));
            ctx.navigator().navigate(Route::Dashboard);
            Ok(())
        }
        Err(e) => Err(msg_error_anyhow!(Message::RegisterFailed(e.to_string()))),
    }
}
