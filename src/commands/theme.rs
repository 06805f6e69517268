use super::AppContext;
use crate::{
    libs::{messages::Message, theme::ThemeMode},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Set the theme explicitly instead of toggling
    #[arg(value_parser = ["light", "dark"])]
    mode: Option<String>,
    /// Only print the current theme
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(ctx: &AppContext, args: ThemeArgs) -> Result<()> {
    let storage = ctx.storage.as_ref();
    if args.show {
        msg_info!(Message::ThemeCurrent(ThemeMode::load(storage).to_string()));
        return Ok(());
    }

    let mode = match args.mode {
        Some(mode) => {
            let mode: ThemeMode = mode.parse().map_err(anyhow::Error::msg)?;
            mode.save(storage)?;
            mode
        }
        None => ThemeMode::toggle(storage)?,
    };
    msg_success!(Message::ThemeChanged(mode.to_string()));
    Ok(())
}
