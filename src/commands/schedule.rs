use super::open_center;
use crate::{
    libs::{messages::Message, scheduler::ScheduleEntry, view::View},
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[arg(help = "Project id")]
    project: String,
}

pub async fn cmd(schedule_args: ScheduleArgs) -> Result<()> {
    let mut center = open_center().await?;
    let name = center.get_project_by_id(&schedule_args.project).await?.project().name.clone();

    msg_print!(Message::ScheduleHeader(name), true);
    let report = center.auto_schedule_project(&schedule_args.project).await?;
    View::schedule(&report);

    let failed: Vec<&ScheduleEntry> = report.failures().collect();
    for entry in &failed {
        if let ScheduleEntry::Failed { task_id, reason } = entry {
            msg_warning!(Message::ScheduleTaskFailed(task_id.clone(), reason.clone()));
        }
    }
    msg_success!(Message::ScheduleSummary {
        moved: report.moved(),
        failed: failed.len(),
    });
    Ok(())
}
