use super::open_center;
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct GanttArgs {
    #[arg(help = "Project id")]
    project: String,
    #[arg(long, help = "Print the layout as JSON")]
    json: bool,
}

pub async fn cmd(gantt_args: GanttArgs) -> Result<()> {
    let mut center = open_center().await?;
    let chart = center.gantt(&gantt_args.project).await?;

    if gantt_args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    msg_print!(Message::GanttHeader(chart.project_name.clone(), chart.unit.to_string()), true);
    if chart.rows.is_empty() {
        msg_info!(Message::NoTasksInProject);
        return Ok(());
    }
    View::gantt(&chart);
    Ok(())
}
