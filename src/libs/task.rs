use super::formatter::optional_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TaskStatus::NotStarted => "not started",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        write!(f, "{}", text)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "optional_date", alias = "startDate")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "endDate")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "actualStartDate")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "actualEndDate")]
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_milestone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    #[serde(default)]
    pub progress: u8,
}

/// Caller-supplied task data. Derived fields do not exist here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "optional_date", alias = "startDate")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "endDate")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "actualStartDate")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "actualEndDate")]
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_milestone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    #[serde(default)]
    pub progress: u8,
}

impl TaskDraft {
    pub fn new(name: &str, planned_start: NaiveDate, planned_end: NaiveDate) -> Self {
        TaskDraft {
            name: name.to_string(),
            planned_start: Some(planned_start),
            planned_end: Some(planned_end),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn depends_on(mut self, dependency: &str) -> Self {
        self.dependencies.insert(dependency.to_string());
        self
    }
}

impl Task {
    /// Materializes a draft inside `project_id`, generating an id when the draft has none.
    pub fn from_draft(project_id: &str, draft: TaskDraft) -> Self {
        Task {
            id: draft.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            project_id: project_id.to_string(),
            name: draft.name,
            description: draft.description,
            planned_start: draft.planned_start,
            planned_end: draft.planned_end,
            actual_start: draft.actual_start,
            actual_end: draft.actual_end,
            status: draft.status,
            priority: draft.priority,
            is_milestone: draft.is_milestone,
            assignee: draft.assignee,
            dependencies: draft.dependencies,
            progress: draft.progress,
        }
    }

    /// Returns the task as a draft that keeps its id.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            planned_start: self.planned_start,
            planned_end: self.planned_end,
            actual_start: self.actual_start,
            actual_end: self.actual_end,
            status: self.status,
            priority: self.priority,
            is_milestone: self.is_milestone,
            assignee: self.assignee.clone(),
            dependencies: self.dependencies.clone(),
            progress: self.progress,
        }
    }

    pub fn start(&mut self, date: NaiveDate) {
        self.actual_start = Some(date);
        if self.status == TaskStatus::NotStarted {
            self.status = TaskStatus::InProgress;
        }
    }

    /// Sets progress, clamped to 100, and moves the status along with it:
    /// 0 is not started, 100 is completed, anything between starts the task.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        match self.progress {
            0 => self.status = TaskStatus::NotStarted,
            100 => self.status = TaskStatus::Completed,
            _ if self.status == TaskStatus::NotStarted => self.status = TaskStatus::InProgress,
            _ => {}
        }
    }

    pub fn complete(&mut self, date: NaiveDate) {
        if self.actual_start.is_none() {
            self.actual_start = Some(date);
        }
        self.actual_end = Some(date);
        self.status = TaskStatus::Completed;
        self.progress = 100;
    }
}
