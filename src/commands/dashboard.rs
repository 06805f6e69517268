use super::{fetch, AppContext};
use crate::{
    libs::{
        aggregation::{compute_analytics_from_tasks, group_by_role_for_today},
        messages::Message,
        navigation::Route,
        task::TaskQuery,
    },
    msg_info,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Compute analytics from the task list instead of asking the server
    #[arg(short, long)]
    local: bool,
}

pub async fn cmd(ctx: &AppContext, args: DashboardArgs) -> Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let scope = ctx.scope();
    let now = Local::now();

    let query = TaskQuery::default();

    let (analytics, tasks) = if args.local {
        let Some(tasks) = fetch(&scope, ctx.api.tasks(&query)).await? else {
            return Ok(());
        };
        (compute_analytics_from_tasks(&tasks, now.naive_local()), tasks)
    } else {
        let both = async { tokio::try_join!(ctx.api.analytics(), ctx.api.tasks(&query)) };
        let Some(result) = fetch(&scope, both).await? else {
            return Ok(());
        };
        result
    };

    let view = ctx.view();
    view.analytics(&analytics);
    if args.local {
        msg_info!(Message::LocalAnalyticsNote);
    }
    view.today(&group_by_role_for_today(&tasks, now.date_naive()));
    Ok(())
}
