use super::AppContext;
use crate::{libs::messages::Message, msg_info, msg_success};
use anyhow::Result;

pub fn cmd(ctx: &AppContext) -> Result<()> {
    let was_signed_in = ctx.session.is_authenticated();
    ctx.session.logout();
    if was_signed_in {
        msg_success!(Message::LoggedOut);
    } else {
        msg_info!(Message::NotLoggedIn);
    }
    Ok(())
}
