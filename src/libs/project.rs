//! Project records.
//!
//! A project owns its tasks: the stored record of a project embeds the full
//! task list, so a single store key holds everything needed to evaluate it.
//! Derived values (calculated status, task statistics) are never part of the
//! record; see [`crate::libs::status::ProcessedProject`].

use super::formatter::{optional_date, optional_datetime};
use super::task::{Priority, Task, TaskDraft};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived project classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Completed,
    OverdueNotStarted,
    OverdueInProgress,
    CompletedOverdue,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OverdueNotStarted,
        ProjectStatus::OverdueInProgress,
        ProjectStatus::CompletedOverdue,
    ];

    pub fn is_completed(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::CompletedOverdue)
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, ProjectStatus::OverdueNotStarted | ProjectStatus::OverdueInProgress | ProjectStatus::CompletedOverdue)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            ProjectStatus::NotStarted => "not started",
            ProjectStatus::InProgress => "in progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OverdueNotStarted => "overdue, not started",
            ProjectStatus::OverdueInProgress => "overdue, in progress",
            ProjectStatus::CompletedOverdue => "completed late",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "optional_date", alias = "startDate")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "endDate")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, with = "optional_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "optional_datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Caller-supplied project data for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "optional_date", alias = "startDate")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "endDate")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

impl ProjectDraft {
    pub fn new(name: &str, planned_start: NaiveDate, planned_end: NaiveDate) -> Self {
        ProjectDraft {
            name: name.to_string(),
            planned_start: Some(planned_start),
            planned_end: Some(planned_end),
            ..Default::default()
        }
    }

    pub fn with_task(mut self, task: TaskDraft) -> Self {
        self.tasks.push(task);
        self
    }
}

impl Project {
    pub fn from_draft(id: &str, draft: ProjectDraft, now: NaiveDateTime) -> Self {
        let tasks = draft.tasks.into_iter().map(|task| Task::from_draft(id, task)).collect();
        Project {
            id: id.to_string(),
            name: draft.name,
            description: draft.description,
            planned_start: draft.planned_start,
            planned_end: draft.planned_end,
            priority: draft.priority,
            tasks,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            planned_start: self.planned_start,
            planned_end: self.planned_end,
            priority: self.priority,
            tasks: self.tasks.iter().map(Task::to_draft).collect(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}
