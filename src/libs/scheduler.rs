//! Dependency-aware auto-scheduling of a project's tasks.
//!
//! Tasks are visited in topological order. Each task is pushed to start no
//! earlier than one workday after the latest planned end among its
//! dependencies, using the dependencies' already rescheduled dates. Its
//! workday duration is kept: `diff_workdays(new_start, new_end)` always
//! equals `diff_workdays(old_start, old_end)`.
//!
//! Scheduling is not atomic. A task that cannot be scheduled keeps its dates
//! and gets a [`ScheduleEntry::Failed`] entry; the remaining tasks are still
//! processed. Only a dependency cycle aborts the whole run.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pmt::libs::calendar::WorkWeek;
//! use pmt::libs::scheduler::auto_schedule;
//! # let tasks = Vec::new();
//!
//! let report = auto_schedule(&tasks, &WorkWeek::default())?;
//! for failure in report.failures() {
//!     println!("{:?}", failure);
//! }
//! # Ok::<(), pmt::libs::error::TrackerError>(())
//! ```

use super::calendar::WorkWeek;
use super::error::TrackerResult;
use super::graph::DependencyGraph;
use super::task::Task;
use super::validation;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Outcome for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScheduleEntry {
    Scheduled {
        task_id: String,
        start: NaiveDate,
        end: NaiveDate,
        moved: bool,
    },
    Failed {
        task_id: String,
        reason: String,
    },
}

impl ScheduleEntry {
    pub fn task_id(&self) -> &str {
        match self {
            ScheduleEntry::Scheduled { task_id, .. } | ScheduleEntry::Failed { task_id, .. } => task_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScheduleEntry::Failed { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleReport {
    /// Tasks in input order, with rescheduled dates applied.
    pub tasks: Vec<Task>,
    /// One entry per task, in scheduling order.
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleReport {
    pub fn failures(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|entry| entry.is_failed())
    }

    pub fn moved(&self) -> usize {
        self.entries.iter().filter(|entry| matches!(entry, ScheduleEntry::Scheduled { moved: true, .. })).count()
    }
}

pub fn auto_schedule(tasks: &[Task], work_week: &WorkWeek) -> TrackerResult<ScheduleReport> {
    let graph = DependencyGraph::build(tasks);
    let order = graph.topological_order()?;

    let index: HashMap<&str, usize> = tasks.iter().enumerate().map(|(i, task)| (task.id.as_str(), i)).collect();
    let mut scheduled: Vec<Task> = tasks.to_vec();
    let mut entries = Vec::with_capacity(order.len());

    for task_id in &order {
        let Some(&position) = index.get(task_id.as_str()) else {
            continue;
        };
        let latest_dependency_end = latest_dependency_end(&scheduled, &index, &graph, task_id);
        let outcome = match graph.dangling().iter().find(|(from, _)| from == task_id) {
            Some((_, missing)) => Err(format!("dependency '{}' does not exist", missing)),
            None => reschedule(&scheduled[position], latest_dependency_end, work_week),
        };
        let entry = match outcome {
            Ok((start, end)) => {
                let task = &mut scheduled[position];
                let moved = task.planned_start != Some(start) || task.planned_end != Some(end);
                debug!(task = %task_id, %start, %end, moved, "scheduled task");
                task.planned_start = Some(start);
                task.planned_end = Some(end);
                ScheduleEntry::Scheduled {
                    task_id: task_id.clone(),
                    start,
                    end,
                    moved,
                }
            }
            Err(reason) => {
                debug!(task = %task_id, %reason, "task left unscheduled");
                ScheduleEntry::Failed {
                    task_id: task_id.clone(),
                    reason,
                }
            }
        };
        entries.push(entry);
    }

    Ok(ScheduleReport { tasks: scheduled, entries })
}

fn latest_dependency_end(tasks: &[Task], index: &HashMap<&str, usize>, graph: &DependencyGraph, task_id: &str) -> Option<NaiveDate> {
    graph
        .dependencies_of(task_id)
        .iter()
        .filter_map(|dep| index.get(dep.as_str()))
        .filter_map(|&i| tasks[i].planned_end)
        .max()
}

fn reschedule(task: &Task, latest_dependency_end: Option<NaiveDate>, work_week: &WorkWeek) -> Result<(NaiveDate, NaiveDate), String> {
    let (Some(old_start), Some(old_end)) = (task.planned_start, task.planned_end) else {
        return Err("planned start and end are required".to_string());
    };

    let duration = work_week.diff_workdays(old_start, old_end);
    if duration == 0 {
        return Err(format!("no workdays between {} and {}", old_start, old_end));
    }

    let start = match latest_dependency_end {
        Some(dep_end) => old_start.max(work_week.add_workdays(dep_end, 1)),
        None => old_start,
    };
    let end = work_week.end_for_duration(start, duration).ok_or_else(|| format!("cannot place {} workdays after {}", duration, start))?;

    let errors = validation::date_range_errors(Some(start), Some(end));
    if !errors.is_empty() {
        return Err(errors.join(", "));
    }

    Ok((start, end))
}
