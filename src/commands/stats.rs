use super::open_center;
use crate::{
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;
use serde_json::json;

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long, help = "Print statistics as JSON")]
    json: bool,
}

pub async fn cmd(stats_args: StatsArgs) -> Result<()> {
    let center = open_center().await?;
    let projects = center.project_statistics();
    let tasks = center.task_statistics();

    if stats_args.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "projects": projects, "tasks": tasks }))?);
        return Ok(());
    }

    msg_print!(Message::ProjectStatisticsHeader, true);
    View::project_statistics(&projects);
    msg_print!(Message::TaskStatisticsHeader, true);
    View::task_statistics(&tasks);
    Ok(())
}
