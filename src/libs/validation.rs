//! Field rules for projects and tasks.
//!
//! Rules are checked on every create and update before anything reaches the
//! store. Failures are collected per entity so the caller sees every broken
//! field at once rather than one per attempt.

use super::error::{TrackerError, TrackerResult};
use super::graph::DependencyGraph;
use super::project::Project;
use super::task::Task;
use chrono::{Months, NaiveDate};
use std::collections::HashSet;

pub const PROJECT_NAME_LENGTH: (usize, usize) = (2, 100);
pub const TASK_NAME_LENGTH: (usize, usize) = (2, 200);
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const MAX_PLAN_YEARS: u32 = 10;

fn name_errors(label: &str, name: &str, (min, max): (usize, usize)) -> Vec<String> {
    let length = name.trim().chars().count();
    if length == 0 {
        vec![format!("{} name is required", label)]
    } else if length < min {
        vec![format!("{} name must be at least {} characters", label, min)]
    } else if length > max {
        vec![format!("{} name must be at most {} characters", label, max)]
    } else {
        Vec::new()
    }
}

fn description_errors(description: Option<&str>) -> Vec<String> {
    match description {
        Some(text) if text.chars().count() > DESCRIPTION_MAX_LENGTH => {
            vec![format!("description must be at most {} characters", DESCRIPTION_MAX_LENGTH)]
        }
        _ => Vec::new(),
    }
}

/// Presence and ordering of a planned range: both ends required, end strictly after start.
pub fn date_range_errors(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<String> {
    let mut errors = Vec::new();
    match (start, end) {
        (Some(start), Some(end)) if end <= start => errors.push(format!("end date {} must be after start date {}", end, start)),
        (Some(_), Some(_)) => {}
        (start, end) => {
            if start.is_none() {
                errors.push("start date is required".to_string());
            }
            if end.is_none() {
                errors.push("end date is required".to_string());
            }
        }
    }
    errors
}

/// Planned end must not lie more than ten years after `today`.
pub fn horizon_errors(end: Option<NaiveDate>, today: NaiveDate) -> Vec<String> {
    let limit = today.checked_add_months(Months::new(MAX_PLAN_YEARS * 12)).unwrap_or(NaiveDate::MAX);
    match end {
        Some(end) if end > limit => vec![format!("end date {} is more than {} years ahead", end, MAX_PLAN_YEARS)],
        _ => Vec::new(),
    }
}

fn is_valid_email(text: &str) -> bool {
    let mut parts = text.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !local.contains(char::is_whitespace) && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Field errors of a single task; dependency links are checked at project level.
pub fn task_errors(task: &Task, today: NaiveDate) -> Vec<String> {
    let mut errors = name_errors("task", &task.name, TASK_NAME_LENGTH);
    errors.extend(description_errors(task.description.as_deref()));
    errors.extend(date_range_errors(task.planned_start, task.planned_end));
    errors.extend(horizon_errors(task.planned_end, today));

    if let (Some(start), Some(end)) = (task.actual_start, task.actual_end) {
        if end < start {
            errors.push(format!("actual end {} is before actual start {}", end, start));
        }
    }
    if task.progress > 100 {
        errors.push(format!("progress {} is outside 0-100", task.progress));
    }
    if let Some(assignee) = task.assignee.as_deref() {
        if assignee.contains('@') && !is_valid_email(assignee) {
            errors.push(format!("assignee '{}' is not a valid email address", assignee));
        }
    }
    errors
}

pub fn validate_task(task: &Task, today: NaiveDate) -> TrackerResult<()> {
    let errors = task_errors(task, today);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TrackerError::validation("Task", errors))
    }
}

/// Dependency links inside a task set: unique ids, no self links, no links
/// outside the set and no cycles.
pub fn validate_dependencies(tasks: &[Task]) -> TrackerResult<()> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            errors.push(format!("task id '{}' is used more than once", task.id));
        }
    }
    for task in tasks {
        for dep in &task.dependencies {
            if dep == &task.id {
                errors.push(format!("task '{}' cannot depend on itself", task.id));
            } else if !ids.contains(dep.as_str()) {
                errors.push(format!("task '{}' depends on unknown task '{}'", task.id, dep));
            }
        }
    }
    if !errors.is_empty() {
        return Err(TrackerError::validation("Task", errors));
    }

    match DependencyGraph::build(tasks).find_cycle() {
        Some(cycle) => Err(TrackerError::CircularDependency { cycle }),
        None => Ok(()),
    }
}

/// Full check of a project record: own fields, every task, then dependency links.
pub fn validate_project(project: &Project, today: NaiveDate) -> TrackerResult<()> {
    let mut errors = name_errors("project", &project.name, PROJECT_NAME_LENGTH);
    errors.extend(description_errors(project.description.as_deref()));
    errors.extend(date_range_errors(project.planned_start, project.planned_end));
    errors.extend(horizon_errors(project.planned_end, today));
    if !errors.is_empty() {
        return Err(TrackerError::validation("Project", errors));
    }

    let failures: Vec<String> = project
        .tasks
        .iter()
        .flat_map(|task| task_errors(task, today).into_iter().map(move |error| format!("'{}': {}", task.name, error)))
        .collect();
    if !failures.is_empty() {
        return Err(TrackerError::validation("Task", failures));
    }

    validate_dependencies(&project.tasks)
}
