//! Status rules for tasks and projects.
//!
//! Every function here is pure: it takes the raw record and the current day
//! and derives a classification. Nothing computed here is written back to the
//! record, so a stale status can never be read from storage.
//!
//! ## Actual-end normalization
//!
//! An actual end later than today cannot have happened yet. Before any rule
//! runs, such a value is cleared with [`clear_invalid_actual_end`]; the rules
//! then behave exactly as if the task had no actual end.
//!
//! ## Terminal task
//!
//! Project overdue evaluation looks at the task with the latest planned end.
//! When several tasks share that date the one with the lowest id wins.

use super::calendar::is_past_due_day;
use super::project::{Project, ProjectStatus};
use super::task::{Task, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Cow;

/// Task counters for one project or a whole portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub completion_rate: u32,
}

/// A project together with the values derived from it on a given day.
///
/// The derived fields can only be produced by [`ProcessedProject::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProject {
    #[serde(flatten)]
    project: Project,
    calculated_status: ProjectStatus,
    task_stats: TaskStats,
    #[serde(skip)]
    evaluated_on: NaiveDate,
}

impl ProcessedProject {
    pub fn evaluate(project: Project, today: NaiveDate) -> Self {
        let calculated_status = calculate_project_status(&project, today);
        let task_stats = calculate_task_stats(&project.tasks, today);
        ProcessedProject {
            project,
            calculated_status,
            task_stats,
            evaluated_on: today,
        }
    }

    /// Returns `self` untouched when it was evaluated on `today`, otherwise a re-evaluated copy.
    pub fn current(&self, today: NaiveDate) -> Cow<'_, ProcessedProject> {
        if self.evaluated_on == today {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(ProcessedProject::evaluate(self.project.clone(), today))
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn id(&self) -> &str {
        &self.project.id
    }

    pub fn calculated_status(&self) -> ProjectStatus {
        self.calculated_status
    }

    pub fn task_stats(&self) -> TaskStats {
        self.task_stats
    }

    pub fn evaluated_on(&self) -> NaiveDate {
        self.evaluated_on
    }

    pub fn is_overdue(&self) -> bool {
        self.calculated_status.is_overdue()
    }
}

/// Copy of `task` with an actual end later than `today` removed.
pub fn clear_invalid_actual_end(task: &Task, today: NaiveDate) -> Cow<'_, Task> {
    match task.actual_end {
        Some(end) if end > today => {
            let mut cleaned = task.clone();
            cleaned.actual_end = None;
            Cow::Owned(cleaned)
        }
        _ => Cow::Borrowed(task),
    }
}

fn valid_actual_end(task: &Task, today: NaiveDate) -> Option<NaiveDate> {
    task.actual_end.filter(|end| *end <= today)
}

pub fn is_task_overdue(task: &Task, today: NaiveDate) -> bool {
    let Some(planned_end) = task.planned_end else {
        return false;
    };
    if !is_past_due_day(today, planned_end) {
        return false;
    }
    match valid_actual_end(task, today) {
        None => true,
        Some(actual_end) => actual_end > planned_end,
    }
}

/// The task with the latest planned end; ties go to the lowest id.
pub fn terminal_task(tasks: &[Task]) -> Option<&Task> {
    tasks
        .iter()
        .filter_map(|task| task.planned_end.map(|end| (end, task)))
        .max_by(|(a_end, a), (b_end, b)| a_end.cmp(b_end).then_with(|| b.id.cmp(&a.id)))
        .map(|(_, task)| task)
}

pub fn is_project_overdue(project: &Project, today: NaiveDate) -> bool {
    let Some(planned_end) = project.planned_end else {
        return false;
    };
    if !is_past_due_day(today, planned_end) {
        return false;
    }
    match terminal_task(&project.tasks) {
        None => true,
        Some(terminal) => match valid_actual_end(terminal, today) {
            None => true,
            Some(actual_end) => actual_end > planned_end,
        },
    }
}

pub fn calculate_project_status(project: &Project, today: NaiveDate) -> ProjectStatus {
    let overdue = is_project_overdue(project, today);
    let tasks = &project.tasks;

    let all_finished = !tasks.is_empty() && tasks.iter().all(|task| task.actual_start.is_some() && valid_actual_end(task, today).is_some());
    let any_started = tasks.iter().any(|task| task.actual_start.is_some());

    match (all_finished, any_started, overdue) {
        (true, _, false) => ProjectStatus::Completed,
        (true, _, true) => ProjectStatus::CompletedOverdue,
        (false, true, false) => ProjectStatus::InProgress,
        (false, true, true) => ProjectStatus::OverdueInProgress,
        (false, false, false) => ProjectStatus::NotStarted,
        (false, false, true) => ProjectStatus::OverdueNotStarted,
    }
}

pub fn calculate_task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let total = tasks.len();
    let mut stats = TaskStats { total, ..Default::default() };
    for task in tasks {
        let actual_end = valid_actual_end(task, today);
        match (task.actual_start, actual_end) {
            (Some(_), Some(_)) => stats.completed += 1,
            (Some(_), None) => stats.in_progress += 1,
            _ => {}
        }
        if is_task_overdue(task, today) {
            stats.overdue += 1;
        }
    }
    stats.completion_rate = percentage(stats.completed, total);
    stats
}

/// The state a task is in once actual dates are taken into account.
///
/// Recorded actual dates win over the stored status field; the stored field
/// covers tasks that were marked done without dates.
pub fn effective_task_status(task: &Task, today: NaiveDate) -> TaskStatus {
    let actual_end = valid_actual_end(task, today);
    if (task.actual_start.is_some() && actual_end.is_some()) || task.status == TaskStatus::Completed {
        TaskStatus::Completed
    } else if task.actual_start.is_some() || task.status == TaskStatus::InProgress {
        TaskStatus::InProgress
    } else {
        TaskStatus::NotStarted
    }
}

/// `round(part / total * 100)`, or 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
