use super::open_center;
use crate::{
    libs::{messages::Message, statistics::ReminderList, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RemindArgs {
    #[arg(short, long, help = "Day-ahead threshold (repeatable); defaults to the configured thresholds")]
    days: Vec<u32>,
    #[arg(long, help = "Also list overdue tasks")]
    overdue: bool,
}

pub async fn cmd(remind_args: RemindArgs) -> Result<()> {
    let center = open_center().await?;

    let lists = if remind_args.days.is_empty() {
        center.reminder_lists()
    } else {
        remind_args
            .days
            .iter()
            .map(|&days| ReminderList {
                days,
                reminders: center.reminders(days),
            })
            .collect()
    };

    for list in &lists {
        if list.reminders.is_empty() {
            msg_info!(Message::NoReminders(list.days));
            continue;
        }
        msg_print!(Message::RemindersHeader(list.days), true);
        View::reminders(&list.reminders);
    }

    if remind_args.overdue {
        let overdue = center.overdue_tasks();
        if overdue.is_empty() {
            msg_info!(Message::NoOverdueTasks);
        } else {
            msg_print!(Message::OverdueHeader, true);
            View::overdue(&overdue);
        }
    }
    Ok(())
}
