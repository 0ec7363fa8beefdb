use super::formatter::{format_bar, format_date, format_datetime, format_rate};
use super::scheduler::{ScheduleEntry, ScheduleReport};
use super::statistics::{GanttChart, OverdueTask, ProjectStatistics, Reminder, TaskStatistics};
use super::status::{effective_task_status, is_task_overdue, ProcessedProject};
use super::task::Task;
use chrono::NaiveDate;
use prettytable::{row, Table};

const GANTT_COLUMNS: usize = 40;

pub struct View {}

impl View {
    pub fn projects(projects: &[ProcessedProject]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "START", "END", "STATUS", "TASKS", "DONE", "OVERDUE", "COMPLETION", "UPDATED"]);
        for processed in projects {
            let project = processed.project();
            let stats = processed.task_stats();
            table.add_row(row![
                project.id,
                project.name,
                format_date(project.planned_start),
                format_date(project.planned_end),
                processed.calculated_status(),
                stats.total,
                stats.completed,
                stats.overdue,
                format_rate(stats.completion_rate),
                format_datetime(project.updated_at)
            ]);
        }
        table.printstd();
    }

    pub fn tasks(tasks: &[Task], today: NaiveDate) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "START", "END", "ACTUAL START", "ACTUAL END", "STATUS", "PRIORITY", "DEPENDS ON", "OVERDUE"]);
        for task in tasks {
            let name = if task.is_milestone { format!("◆ {}", task.name) } else { task.name.clone() };
            table.add_row(row![
                task.id,
                name,
                format_date(task.planned_start),
                format_date(task.planned_end),
                format_date(task.actual_start),
                format_date(task.actual_end),
                effective_task_status(task, today),
                task.priority,
                task.dependencies.iter().cloned().collect::<Vec<_>>().join(", "),
                if is_task_overdue(task, today) { "yes" } else { "" }
            ]);
        }
        table.printstd();
    }

    pub fn schedule(report: &ScheduleReport) {
        let mut table = Table::new();

        table.add_row(row!["TASK", "START", "END", "RESULT"]);
        for entry in &report.entries {
            let name = report.tasks.iter().find(|t| t.id == entry.task_id()).map(|t| t.name.as_str()).unwrap_or(entry.task_id());
            match entry {
                ScheduleEntry::Scheduled { start, end, moved, .. } => {
                    table.add_row(row![name, start, end, if *moved { "moved" } else { "unchanged" }]);
                }
                ScheduleEntry::Failed { reason, .. } => {
                    table.add_row(row![name, "-", "-", reason]);
                }
            }
        }
        table.printstd();
    }

    pub fn project_statistics(stats: &ProjectStatistics) {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "NOT STARTED", "IN PROGRESS", "COMPLETED", "OVERDUE", "COMPLETION", "OVERDUE RATE"]);
        table.add_row(row![
            stats.total,
            stats.not_started,
            stats.in_progress,
            stats.completed,
            stats.overdue,
            format_rate(stats.completion_rate),
            format_rate(stats.overdue_rate)
        ]);
        table.printstd();

        let mut distribution = Table::new();
        distribution.add_row(row!["STATUS", "PROJECTS"]);
        for (status, count) in &stats.distribution {
            distribution.add_row(row![status, count]);
        }
        distribution.printstd();

        let mut created = Table::new();
        created.add_row(row!["CREATED", "LAST 7 DAYS", "LAST 30 DAYS", "LAST 90 DAYS"]);
        created.add_row(row!["projects", stats.created.this_week, stats.created.this_month, stats.created.this_quarter]);
        created.printstd();
    }

    pub fn task_statistics(stats: &TaskStatistics) {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "NOT STARTED", "IN PROGRESS", "COMPLETED", "OVERDUE", "COMPLETION", "OVERDUE RATE", "MILESTONES"]);
        table.add_row(row![
            stats.total,
            stats.not_started,
            stats.in_progress,
            stats.completed,
            stats.overdue,
            format_rate(stats.completion_rate),
            format_rate(stats.overdue_rate),
            format!("{}/{}", stats.milestones.completed, stats.milestones.total)
        ]);
        table.printstd();

        let mut breakdown = Table::new();
        breakdown.add_row(row!["GROUP", "TOTAL", "IN PROGRESS", "COMPLETED", "OVERDUE"]);
        for (priority, group) in &stats.by_priority {
            breakdown.add_row(row![format!("priority: {}", priority), group.total, group.in_progress, group.completed, group.overdue]);
        }
        for (assignee, group) in &stats.by_assignee {
            breakdown.add_row(row![assignee, group.total, group.in_progress, group.completed, group.overdue]);
        }
        breakdown.printstd();
    }

    pub fn reminders(reminders: &[Reminder]) {
        let mut table = Table::new();

        table.add_row(row!["PROJECT", "TASK", "DUE", "DAYS LEFT", "URGENCY", "PRIORITY"]);
        for reminder in reminders {
            table.add_row(row![
                reminder.project_name,
                reminder.task_name,
                reminder.planned_end,
                reminder.days_left,
                reminder.urgency,
                reminder.priority
            ]);
        }
        table.printstd();
    }

    pub fn overdue(tasks: &[OverdueTask]) {
        let mut table = Table::new();

        table.add_row(row!["PROJECT", "TASK", "DUE", "DAYS OVERDUE", "PRIORITY"]);
        for task in tasks {
            table.add_row(row![task.project_name, task.task_name, task.planned_end, task.days_overdue, task.priority]);
        }
        table.printstd();
    }

    pub fn gantt(chart: &GanttChart) {
        let mut table = Table::new();

        table.add_row(row!["TASK", "START", "END", format!("{} .. {}", chart.start, chart.end), "PROGRESS"]);
        for line in &chart.rows {
            let mut name = line.name.clone();
            if line.is_overdue {
                name.push_str(" (!)");
            }
            table.add_row(row![name, line.start, line.end, format_bar(line.left, line.width, GANTT_COLUMNS, line.is_milestone), format_rate(line.progress)]);
        }
        table.printstd();
    }
}
