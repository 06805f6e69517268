use super::{fetch, AppContext};
use crate::{
    libs::{
        aggregation::{group_by_day_and_role, week_days, week_end, week_start},
        formatter::day_heading,
        messages::Message,
        navigation::Route,
        task::TaskQuery,
    },
    msg_print,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct WeeklyArgs {
    /// Any day of the week to show (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Weeks to shift from that day, e.g. 1 for next week or -1 for last week
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
}

pub async fn cmd(ctx: &AppContext, args: WeeklyArgs) -> Result<()> {
    ctx.enter(Route::Weekly).await?;

    let start = ctx.config.week_start();
    let anchor = args.date.unwrap_or_else(|| Local::now().date_naive()) + Duration::weeks(args.offset);
    let first = week_start(anchor, start);
    let last = week_end(anchor, start);

    let query = TaskQuery {
        start_date: Some(first),
        end_date: Some(last),
        ..TaskQuery::default()
    };
    let scope = ctx.scope();
    let Some(tasks) = fetch(&scope, ctx.api.tasks(&query)).await? else {
        return Ok(());
    };

    let groups = group_by_day_and_role(&tasks, anchor, anchor, start);
    msg_print!(Message::WeekHeader(day_heading(first), day_heading(last)), true);
    ctx.view().weekly(&week_days(anchor, start), &groups);
    Ok(())
}
