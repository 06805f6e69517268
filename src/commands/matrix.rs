use super::{fetch, AppContext};
use crate::libs::{aggregation::group_by_quadrant, navigation::Route, task::TaskQuery};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MatrixArgs {
    /// Only tasks of this role ID
    #[arg(long)]
    role: Option<i64>,
    /// Hide completed tasks
    #[arg(long)]
    open: bool,
}

pub async fn cmd(ctx: &AppContext, args: MatrixArgs) -> Result<()> {
    ctx.enter(Route::Matrix).await?;
    let query = TaskQuery {
        role: args.role,
        ..TaskQuery::default()
    };
    let scope = ctx.scope();
    let Some(mut tasks) = fetch(&scope, ctx.api.tasks(&query)).await? else {
        return Ok(());
    };
    if args.open {
        tasks.retain(|task| !task.is_completed);
    }
    ctx.view().matrix(&group_by_quadrant(&tasks));
    Ok(())
}
