//! Aggregate statistics over processed projects.
//!
//! This module turns a set of [`ProcessedProject`]s into the figures shown on
//! the dashboard and in reminders:
//!
//! - **Project statistics**: status distribution plus merged buckets and rates,
//!   and how many projects were created in the last week, month and quarter.
//! - **Task statistics**: portfolio-wide task counters with milestone,
//!   priority and assignee breakdowns.
//! - **Reminders**: tasks due within the next N days, most urgent first.
//! - **Overdue tasks**: tasks past their planned end, with days overdue.
//! - **Gantt layout**: per-task offsets and widths over the project span.
//!
//! Rates are whole percentages rounded half away from zero, and 0 whenever
//! the population is empty.

use super::calendar::{date_range, diff_days, WorkWeek};
use super::project::{Project, ProjectStatus};
use super::status::{clear_invalid_actual_end, effective_task_status, is_task_overdue, percentage, ProcessedProject};
use super::task::{Priority, Task, TaskStatus};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Days of span used for a project without any planned dates.
pub const EMPTY_GANTT_DAYS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatistics {
    pub total: usize,
    pub distribution: BTreeMap<ProjectStatus, usize>,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    pub completion_rate: u32,
    pub overdue_rate: u32,
    pub created: TimeRangeStats,
}

/// Projects created within the trailing 7, 30 and 90 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeStats {
    pub this_week: usize,
    pub this_month: usize,
    pub this_quarter: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneStats {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub overdue: usize,
    pub completion_rate: u32,
    pub overdue_rate: u32,
    pub milestones: MilestoneStats,
    pub by_priority: BTreeMap<Priority, BreakdownStats>,
    pub by_assignee: BTreeMap<String, BreakdownStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            d if d <= 1 => Urgency::Critical,
            d if d <= 3 => Urgency::High,
            d if d <= 7 => Urgency::Medium,
            _ => Urgency::Low,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub project_id: String,
    pub project_name: String,
    pub task_id: String,
    pub task_name: String,
    pub planned_end: NaiveDate,
    pub days_left: i64,
    pub urgency: Urgency,
    pub priority: Priority,
    pub is_milestone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderList {
    pub days: u32,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueTask {
    pub project_id: String,
    pub project_name: String,
    pub task_id: String,
    pub task_name: String,
    pub planned_end: NaiveDate,
    pub days_overdue: i64,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GanttUnit {
    #[default]
    Calendar,
    Workday,
}

impl fmt::Display for GanttUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GanttUnit::Calendar => write!(f, "calendar days"),
            GanttUnit::Workday => write!(f, "workdays"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttRow {
    pub task_id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Units between the span start and the task start.
    pub offset: i64,
    /// Units covered by the task, both ends included.
    pub length: i64,
    /// `offset / total_units`.
    pub left: f64,
    /// `length / total_units`.
    pub width: f64,
    pub progress: u32,
    pub status: TaskStatus,
    pub is_overdue: bool,
    pub is_milestone: bool,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub is_workday: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttChart {
    pub project_id: String,
    pub project_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub unit: GanttUnit,
    pub total_units: i64,
    pub rows: Vec<GanttRow>,
    pub timeline: Vec<TimelineDay>,
}

/// Counts projects whose creation time lies strictly after `now` minus 7, 30
/// and 90 days. Projects without a creation time are not counted.
pub fn time_range_stats(projects: &[ProcessedProject], now: NaiveDateTime) -> TimeRangeStats {
    let created_within = |days: i64| {
        let since = now - Duration::days(days);
        projects.iter().filter(|p| p.project().created_at.is_some_and(|created| created > since)).count()
    };
    TimeRangeStats {
        this_week: created_within(7),
        this_month: created_within(30),
        this_quarter: created_within(90),
    }
}

pub fn project_statistics(projects: &[ProcessedProject], now: NaiveDateTime) -> ProjectStatistics {
    let mut distribution: BTreeMap<ProjectStatus, usize> = ProjectStatus::ALL.iter().map(|status| (*status, 0)).collect();
    for project in projects {
        *distribution.entry(project.calculated_status()).or_default() += 1;
    }
    let count = |status: ProjectStatus| distribution.get(&status).copied().unwrap_or(0);

    let total = projects.len();
    let not_started = count(ProjectStatus::NotStarted) + count(ProjectStatus::OverdueNotStarted);
    let in_progress = count(ProjectStatus::InProgress) + count(ProjectStatus::OverdueInProgress);
    let completed = count(ProjectStatus::Completed) + count(ProjectStatus::CompletedOverdue);
    let overdue = count(ProjectStatus::OverdueNotStarted) + count(ProjectStatus::OverdueInProgress) + count(ProjectStatus::CompletedOverdue);

    ProjectStatistics {
        total,
        not_started,
        in_progress,
        completed,
        overdue,
        completion_rate: percentage(completed, total),
        overdue_rate: percentage(overdue, total),
        distribution,
        created: time_range_stats(projects, now),
    }
}

fn tally(stats: &mut BreakdownStats, status: TaskStatus, overdue: bool) {
    stats.total += 1;
    match status {
        TaskStatus::Completed => stats.completed += 1,
        TaskStatus::InProgress => stats.in_progress += 1,
        TaskStatus::NotStarted => {}
    }
    if overdue {
        stats.overdue += 1;
    }
}

pub fn task_statistics(projects: &[ProcessedProject], today: NaiveDate) -> TaskStatistics {
    let mut stats = TaskStatistics {
        by_priority: Priority::ALL.iter().map(|priority| (*priority, BreakdownStats::default())).collect(),
        ..Default::default()
    };

    for task in projects.iter().flat_map(|project| project.project().tasks.iter()) {
        let task = clear_invalid_actual_end(task, today);
        let overdue = is_task_overdue(&task, today);
        let status = effective_task_status(&task, today);

        stats.total += 1;
        match (task.actual_start, task.actual_end) {
            (Some(_), Some(_)) => stats.completed += 1,
            (Some(_), None) => stats.in_progress += 1,
            _ => {}
        }
        if overdue {
            stats.overdue += 1;
        }
        if task.is_milestone {
            stats.milestones.total += 1;
            if status == TaskStatus::Completed {
                stats.milestones.completed += 1;
            }
        }
        tally(stats.by_priority.entry(task.priority).or_default(), status, overdue);
        if let Some(assignee) = task.assignee.as_deref().filter(|a| !a.trim().is_empty()) {
            tally(stats.by_assignee.entry(assignee.to_string()).or_default(), status, overdue);
        }
    }

    stats.not_started = stats.total - stats.completed - stats.in_progress;
    stats.completion_rate = percentage(stats.completed, stats.total);
    stats.overdue_rate = percentage(stats.overdue, stats.total);
    stats.milestones.completion_rate = percentage(stats.milestones.completed, stats.milestones.total);
    stats
}

/// Open tasks whose planned end falls in `(today, today + days]`, soonest first.
pub fn reminders(projects: &[ProcessedProject], days: u32, today: NaiveDate) -> Vec<Reminder> {
    let horizon = today.checked_add_days(Days::new(days as u64)).unwrap_or(NaiveDate::MAX);
    let mut found = Vec::new();

    for project in projects.iter().map(ProcessedProject::project) {
        for task in &project.tasks {
            let Some(planned_end) = task.planned_end else {
                continue;
            };
            if planned_end <= today || planned_end > horizon || effective_task_status(task, today) == TaskStatus::Completed {
                continue;
            }
            let days_left = diff_days(today, planned_end);
            found.push(Reminder {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                planned_end,
                days_left,
                urgency: Urgency::from_days_left(days_left),
                priority: task.priority,
                is_milestone: task.is_milestone,
            });
        }
    }

    found.sort_by(|a, b| a.days_left.cmp(&b.days_left).then_with(|| a.planned_end.cmp(&b.planned_end)).then_with(|| a.task_id.cmp(&b.task_id)));
    found
}

/// One reminder list per threshold, in threshold order.
pub fn reminder_lists(projects: &[ProcessedProject], thresholds: &[u32], today: NaiveDate) -> Vec<ReminderList> {
    thresholds
        .iter()
        .map(|&days| ReminderList {
            days,
            reminders: reminders(projects, days, today),
        })
        .collect()
}

/// Overdue tasks, longest overdue first.
pub fn overdue_tasks(projects: &[ProcessedProject], today: NaiveDate) -> Vec<OverdueTask> {
    let mut found: Vec<OverdueTask> = projects
        .iter()
        .map(ProcessedProject::project)
        .flat_map(|project| project.tasks.iter().map(move |task| (project, task)))
        .filter(|(_, task)| is_task_overdue(task, today))
        .filter_map(|(project, task)| {
            let planned_end = task.planned_end?;
            Some(OverdueTask {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                planned_end,
                days_overdue: diff_days(planned_end, today),
                priority: task.priority,
            })
        })
        .collect();

    found.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue).then_with(|| a.task_id.cmp(&b.task_id)));
    found
}

/// Progress shown on a Gantt bar.
///
/// Completed tasks are at 100, tasks not started at 0. In-progress tasks
/// interpolate the calendar days elapsed since the planned start over the
/// planned duration.
pub fn task_progress(task: &Task, today: NaiveDate) -> u32 {
    match effective_task_status(task, today) {
        TaskStatus::Completed => 100,
        TaskStatus::NotStarted => 0,
        TaskStatus::InProgress => {
            let (Some(start), Some(end)) = (task.planned_start, task.planned_end) else {
                return task.progress.min(100) as u32;
            };
            let planned = diff_days(start, end);
            if planned <= 0 {
                return if today >= end { 100 } else { 0 };
            }
            let elapsed = diff_days(start, today);
            ((elapsed as f64 / planned as f64) * 100.0).clamp(0.0, 100.0).round() as u32
        }
    }
}

fn span(project: &Project, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let starts = project.planned_start.into_iter().chain(project.tasks.iter().filter_map(|t| t.planned_start));
    let ends = project.planned_end.into_iter().chain(project.tasks.iter().filter_map(|t| t.planned_end));
    let all = starts.clone().chain(ends.clone());

    match (all.clone().min(), all.max()) {
        (Some(start), Some(end)) => (start, end),
        _ => (today, today.checked_add_days(Days::new(EMPTY_GANTT_DAYS)).unwrap_or(today)),
    }
}

fn units_between(unit: GanttUnit, work_week: &WorkWeek, from: NaiveDate, to: NaiveDate) -> i64 {
    match unit {
        GanttUnit::Calendar => diff_days(from, to) + 1,
        GanttUnit::Workday => work_week.diff_workdays(from, to),
    }
}

/// Row layout for every task of `project` that has a planned range.
pub fn gantt(project: &Project, unit: GanttUnit, work_week: &WorkWeek, today: NaiveDate) -> GanttChart {
    let (span_start, span_end) = span(project, today);
    let total_units = units_between(unit, work_week, span_start, span_end).max(1);

    let rows = project
        .tasks
        .iter()
        .filter_map(|task| {
            let (start, end) = (task.planned_start?, task.planned_end?);
            let offset = match start.pred_opt() {
                Some(before) if start > span_start => units_between(unit, work_week, span_start, before),
                _ => 0,
            };
            let length = units_between(unit, work_week, start, end).max(0);
            Some(GanttRow {
                task_id: task.id.clone(),
                name: task.name.clone(),
                start,
                end,
                offset,
                length,
                left: offset as f64 / total_units as f64,
                width: length as f64 / total_units as f64,
                progress: task_progress(task, today),
                status: effective_task_status(task, today),
                is_overdue: is_task_overdue(task, today),
                is_milestone: task.is_milestone,
                dependencies: task.dependencies.iter().cloned().collect(),
            })
        })
        .collect();

    let timeline = date_range(span_start, span_end)
        .into_iter()
        .map(|date| TimelineDay {
            date,
            is_workday: work_week.is_workday(date),
            is_today: date == today,
        })
        .collect();

    GanttChart {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        start: span_start,
        end: span_end,
        unit,
        total_units,
        rows,
        timeline,
    }
}
