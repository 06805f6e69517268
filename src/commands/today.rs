use super::{fetch, AppContext};
use crate::libs::{aggregation::group_by_role_for_today, navigation::Route, task::TaskQuery};
use anyhow::Result;
use chrono::Local;

pub async fn cmd(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let scope = ctx.scope();
    let Some(tasks) = fetch(&scope, ctx.api.tasks(&TaskQuery::default())).await? else {
        return Ok(());
    };
    let groups = group_by_role_for_today(&tasks, Local::now().date_naive());
    ctx.view().today(&groups);
    Ok(())
}
