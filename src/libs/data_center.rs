//! The data center: the single owner of processed projects.
//!
//! A [`DataCenter`] sits between callers and a [`RecordStore`]. It keeps the
//! authoritative in-memory set of [`ProcessedProject`]s, writes every change
//! through to the store and recomputes derived values after every load and
//! mutation. Caller data never carries derived fields: drafts have none and
//! any derived field found in a stored record is ignored on read.
//!
//! ## Lifecycle
//!
//! ```rust,no_run
//! use pmt::libs::clock::SystemClock;
//! use pmt::libs::config::Config;
//! use pmt::libs::data_center::DataCenter;
//! use pmt::libs::store::MemoryStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut center = DataCenter::new(MemoryStore::new(), SystemClock, &Config::default())?;
//! center.load_all_projects().await?;
//! let stats = center.project_statistics();
//! println!("{} projects, {}% completed", stats.total, stats.completion_rate);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure handling
//!
//! - Unreadable or foreign-version records are logged and treated as absent.
//! - A save rejected with [`StoreError::QuotaExceeded`] triggers one
//!   [`RecordStore::cleanup`] and one retry; a second rejection is returned.
//!
//! ## Concurrency
//!
//! Writes are last-writer-wins. Mutating methods take `&mut self`, which
//! serializes writes through one instance, but two data centers over the same
//! store are not coordinated: overlapping updates of the same project from
//! both will silently keep whichever save lands last.

use super::calendar::{diff_days, WorkWeek};
use super::clock::Clock;
use super::config::Config;
use super::error::{StoreError, TrackerError, TrackerResult};
use super::graph::DependencyGraph;
use super::project::{Project, ProjectDraft};
use super::scheduler::{auto_schedule, ScheduleReport};
use super::statistics::{self, GanttChart, GanttUnit, OverdueTask, ProjectStatistics, Reminder, ReminderList, TaskStatistics};
use super::status::ProcessedProject;
use super::store::{seal, unseal, RecordStore, RECORD_VERSION};
use super::task::{Task, TaskDraft, TaskStatus};
use super::validation::validate_project;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Portable snapshot of every project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub version: String,
    pub exported_at: NaiveDateTime,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported { id: String, name: String },
    Skipped { id: String, name: String },
    Failed { id: String, name: String, reason: String },
}

/// How [`DataCenter::duplicate_project`] builds the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOptions {
    pub include_tasks: bool,
    pub name_prefix: String,
    /// Move the copy so that it starts today. Every planned date shifts by
    /// the same number of days, so durations and task order are kept.
    pub reset_dates: bool,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        DuplicateOptions {
            include_tasks: true,
            name_prefix: "Copy of ".to_string(),
            reset_dates: true,
        }
    }
}

pub struct DataCenter<S: RecordStore, C: Clock> {
    store: S,
    clock: C,
    work_week: WorkWeek,
    gantt_unit: GanttUnit,
    reminder_days: Vec<u32>,
    projects: Vec<ProcessedProject>,
}

impl<S: RecordStore, C: Clock> DataCenter<S, C> {
    pub fn new(store: S, clock: C, config: &Config) -> TrackerResult<Self> {
        Ok(DataCenter {
            store,
            clock,
            work_week: config.work_week()?,
            gantt_unit: config.gantt_unit,
            reminder_days: config.reminder_thresholds(),
            projects: Vec::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn work_week(&self) -> &WorkWeek {
        &self.work_week
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fetches every record, evaluates it and replaces the in-memory set.
    pub async fn load_all_projects(&mut self) -> TrackerResult<&[ProcessedProject]> {
        let today = self.clock.today();
        let records = self.store.get_all().await?;
        let mut projects = Vec::with_capacity(records.len());

        for (id, record) in records {
            match unseal::<Project>(&record) {
                Ok(project) => projects.push(ProcessedProject::evaluate(project, today)),
                Err(reason) => warn!(record = %id, %reason, "skipping unreadable project record"),
            }
        }
        projects.sort_by(|a, b| {
            let (a, b) = (a.project(), b.project());
            a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)).then_with(|| a.id.cmp(&b.id))
        });

        info!(count = projects.len(), "loaded projects");
        self.projects = projects;
        Ok(&self.projects)
    }

    /// The in-memory projects, re-evaluated if the day has changed since they were computed.
    pub fn projects(&self) -> Cow<'_, [ProcessedProject]> {
        let today = self.clock.today();
        if self.projects.iter().all(|p| p.evaluated_on() == today) {
            Cow::Borrowed(&self.projects)
        } else {
            Cow::Owned(self.projects.iter().map(|p| p.current(today).into_owned()).collect())
        }
    }

    /// Serves from memory, falling back to one store fetch on a miss.
    pub async fn get_project_by_id(&mut self, id: &str) -> TrackerResult<ProcessedProject> {
        let today = self.clock.today();
        if let Some(cached) = self.projects.iter().find(|p| p.id() == id) {
            return Ok(cached.current(today).into_owned());
        }

        let record = self.store.get(id).await?.ok_or_else(|| TrackerError::not_found("Project", id))?;
        let project = match unseal::<Project>(&record) {
            Ok(project) => project,
            Err(reason) => {
                warn!(record = %id, %reason, "project record is unreadable");
                return Err(TrackerError::not_found("Project", id));
            }
        };
        let processed = ProcessedProject::evaluate(project, today);
        self.upsert(processed.clone());
        Ok(processed)
    }

    pub async fn create_project(&mut self, draft: ProjectDraft) -> TrackerResult<ProcessedProject> {
        let id = uuid::Uuid::new_v4().to_string();
        let project = Project::from_draft(&id, draft, self.clock.now());
        let processed = self.save_project(project).await?;
        info!(project = %id, "created project");
        Ok(processed)
    }

    /// Replaces the project's own fields. Creation time is kept.
    ///
    /// A draft without tasks keeps the project's current tasks; a draft with
    /// tasks replaces them. Single tasks are removed with [`Self::remove_task`].
    pub async fn update_project(&mut self, id: &str, draft: ProjectDraft) -> TrackerResult<ProcessedProject> {
        let existing = self.get_project_by_id(id).await?.into_project();
        let keep_tasks = draft.tasks.is_empty();
        let mut project = Project::from_draft(id, draft, self.clock.now());
        project.created_at = existing.created_at;
        if keep_tasks {
            project.tasks = existing.tasks;
        }
        let processed = self.save_project(project).await?;
        info!(project = %id, "updated project");
        Ok(processed)
    }

    /// Creates a new project from an existing one.
    ///
    /// Copied tasks get fresh ids, their dependency links are rewired to the
    /// copies and their progress is reset to not started.
    pub async fn duplicate_project(&mut self, id: &str, options: DuplicateOptions) -> TrackerResult<ProcessedProject> {
        let source = self.get_project_by_id(id).await?.into_project();
        let shift = match (options.reset_dates, source.planned_start) {
            (true, Some(start)) => diff_days(start, self.clock.today()),
            _ => 0,
        };
        let moved = |date: Option<NaiveDate>| date.and_then(|d| d.checked_add_signed(Duration::days(shift)));

        let mut tasks = Vec::new();
        if options.include_tasks {
            let ids: HashMap<&str, String> = source.tasks.iter().map(|t| (t.id.as_str(), uuid::Uuid::new_v4().to_string())).collect();
            for task in &source.tasks {
                tasks.push(TaskDraft {
                    id: ids.get(task.id.as_str()).cloned(),
                    planned_start: moved(task.planned_start),
                    planned_end: moved(task.planned_end),
                    actual_start: None,
                    actual_end: None,
                    status: TaskStatus::NotStarted,
                    progress: 0,
                    dependencies: task.dependencies.iter().filter_map(|dep| ids.get(dep.as_str()).cloned()).collect(),
                    ..task.to_draft()
                });
            }
        }

        let draft = ProjectDraft {
            name: format!("{}{}", options.name_prefix, source.name),
            planned_start: moved(source.planned_start),
            planned_end: moved(source.planned_end),
            tasks,
            ..source.to_draft()
        };
        let copy = self.create_project(draft).await?;
        debug!(source = %id, copy = %copy.id(), shift, "duplicated project");
        Ok(copy)
    }

    pub async fn delete_project(&mut self, id: &str) -> TrackerResult<()> {
        let removed = self.store.delete(id).await?;
        let cached = self.projects.iter().position(|p| p.id() == id);
        if let Some(index) = cached {
            self.projects.remove(index);
        }
        if !removed && cached.is_none() {
            return Err(TrackerError::not_found("Project", id));
        }
        info!(project = %id, "deleted project");
        Ok(())
    }

    pub async fn add_task(&mut self, project_id: &str, draft: TaskDraft) -> TrackerResult<Task> {
        self.mutate_project(project_id, |project| {
            let task = Task::from_draft(&project.id, draft);
            project.tasks.push(task.clone());
            Ok(task)
        })
        .await
    }

    /// Replaces a task's data. The task keeps its id.
    ///
    /// A changed progress value also moves the status, see [`Task::set_progress`].
    pub async fn update_task(&mut self, project_id: &str, task_id: &str, draft: TaskDraft) -> TrackerResult<Task> {
        self.mutate_project(project_id, |project| {
            let project_id = project.id.clone();
            let task = project.task_mut(task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            let previous_progress = task.progress;
            *task = Task::from_draft(&project_id, draft.with_id(task_id));
            if task.progress != previous_progress {
                task.set_progress(task.progress);
            }
            Ok(task.clone())
        })
        .await
    }

    pub async fn update_progress(&mut self, project_id: &str, task_id: &str, progress: u8) -> TrackerResult<Task> {
        self.mutate_project(project_id, |project| {
            let task = project.task_mut(task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            task.set_progress(progress);
            Ok(task.clone())
        })
        .await
    }

    /// Removes a task and drops it from every other task's dependencies.
    pub async fn remove_task(&mut self, project_id: &str, task_id: &str) -> TrackerResult<Task> {
        self.mutate_project(project_id, |project| {
            let index = project.tasks.iter().position(|t| t.id == task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            let removed = project.tasks.remove(index);
            for task in &mut project.tasks {
                task.dependencies.remove(task_id);
            }
            Ok(removed)
        })
        .await
    }

    pub async fn set_task_dependencies(&mut self, project_id: &str, task_id: &str, dependencies: BTreeSet<String>) -> TrackerResult<Task> {
        self.mutate_project(project_id, |project| {
            let task = project.task_mut(task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            task.dependencies = dependencies;
            Ok(task.clone())
        })
        .await
    }

    /// Stamps the actual start, defaulting to today.
    pub async fn start_task(&mut self, project_id: &str, task_id: &str, date: Option<NaiveDate>) -> TrackerResult<Task> {
        let date = date.unwrap_or_else(|| self.clock.today());
        self.mutate_project(project_id, |project| {
            let task = project.task_mut(task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            task.start(date);
            Ok(task.clone())
        })
        .await
    }

    /// Stamps the actual end, defaulting to today.
    pub async fn complete_task(&mut self, project_id: &str, task_id: &str, date: Option<NaiveDate>) -> TrackerResult<Task> {
        let date = date.unwrap_or_else(|| self.clock.today());
        self.mutate_project(project_id, |project| {
            let task = project.task_mut(task_id).ok_or_else(|| TrackerError::not_found("Task", task_id))?;
            task.complete(date);
            Ok(task.clone())
        })
        .await
    }

    /// Every task `task_id` transitively depends on, nearest first.
    pub async fn dependency_chain(&mut self, project_id: &str, task_id: &str) -> TrackerResult<Vec<Task>> {
        let processed = self.get_project_by_id(project_id).await?;
        let project = processed.project();
        if project.task(task_id).is_none() {
            return Err(TrackerError::not_found("Task", task_id));
        }
        let chain = DependencyGraph::build(&project.tasks).dependency_chain(task_id);
        Ok(chain.iter().filter_map(|id| project.task(id).cloned()).collect())
    }

    /// Reschedules a project's tasks and writes the result through.
    ///
    /// Tasks that could not be scheduled keep their dates and are listed as
    /// failures in the report. A dependency cycle aborts without writing.
    pub async fn auto_schedule_project(&mut self, project_id: &str) -> TrackerResult<ScheduleReport> {
        let processed = self.get_project_by_id(project_id).await?;
        let report = auto_schedule(&processed.project().tasks, &self.work_week)?;

        if report.moved() > 0 {
            let mut project = processed.into_project();
            project.tasks = report.tasks.clone();
            project.updated_at = Some(self.clock.now());
            self.persist(&project).await?;
            self.upsert(ProcessedProject::evaluate(project, self.clock.today()));
        }
        debug!(project = %project_id, moved = report.moved(), failed = report.failures().count(), "auto-scheduled project");
        Ok(report)
    }

    pub fn project_statistics(&self) -> ProjectStatistics {
        statistics::project_statistics(&self.projects(), self.clock.now())
    }

    pub fn task_statistics(&self) -> TaskStatistics {
        statistics::task_statistics(&self.projects(), self.clock.today())
    }

    pub fn reminders(&self, days: u32) -> Vec<Reminder> {
        statistics::reminders(&self.projects(), days, self.clock.today())
    }

    /// Reminder lists for the configured thresholds.
    pub fn reminder_lists(&self) -> Vec<ReminderList> {
        statistics::reminder_lists(&self.projects(), &self.reminder_days, self.clock.today())
    }

    pub fn overdue_tasks(&self) -> Vec<OverdueTask> {
        statistics::overdue_tasks(&self.projects(), self.clock.today())
    }

    /// Projects whose name or description contains `keyword`, ignoring case.
    /// A blank keyword matches every project.
    pub fn search(&self, keyword: &str) -> Vec<ProcessedProject> {
        let keyword = keyword.trim().to_lowercase();
        self.projects()
            .iter()
            .filter(|p| {
                let project = p.project();
                project.name.to_lowercase().contains(&keyword) || project.description.as_deref().is_some_and(|text| text.to_lowercase().contains(&keyword))
            })
            .cloned()
            .collect()
    }

    /// Unfinished projects planned to end after today and at most `days` days ahead, soonest first.
    pub fn upcoming_projects(&self, days: u32) -> Vec<ProcessedProject> {
        let today = self.clock.today();
        let horizon = today.checked_add_days(Days::new(u64::from(days))).unwrap_or(NaiveDate::MAX);
        let mut upcoming: Vec<ProcessedProject> = self
            .projects()
            .iter()
            .filter(|p| !p.calculated_status().is_completed())
            .filter(|p| p.project().planned_end.is_some_and(|end| end > today && end <= horizon))
            .cloned()
            .collect();
        upcoming.sort_by_key(|p| p.project().planned_end);
        upcoming
    }

    /// Unfinished projects whose derived status is overdue.
    pub fn overdue_projects(&self) -> Vec<ProcessedProject> {
        self.projects()
            .iter()
            .filter(|p| {
                let status = p.calculated_status();
                status.is_overdue() && !status.is_completed()
            })
            .cloned()
            .collect()
    }

    pub async fn gantt(&mut self, project_id: &str) -> TrackerResult<GanttChart> {
        let processed = self.get_project_by_id(project_id).await?;
        Ok(statistics::gantt(processed.project(), self.gantt_unit, &self.work_week, self.clock.today()))
    }

    pub fn export_projects(&self) -> ProjectExport {
        ProjectExport {
            version: RECORD_VERSION.to_string(),
            exported_at: self.clock.now(),
            projects: self.projects.iter().map(|p| p.project().clone()).collect(),
        }
    }

    /// Imports every project of `export`, one outcome per project.
    ///
    /// Existing projects are skipped unless `overwrite` is set. A project that
    /// fails validation or cannot be saved does not stop the others.
    pub async fn import_projects(&mut self, export: ProjectExport, overwrite: bool) -> TrackerResult<Vec<ImportOutcome>> {
        if export.version != RECORD_VERSION {
            return Err(TrackerError::validation("Export", vec![format!("version {} is not supported", export.version)]));
        }

        let mut outcomes = Vec::with_capacity(export.projects.len());
        for mut project in export.projects {
            let (id, name) = (project.id.clone(), project.name.clone());
            for task in &mut project.tasks {
                task.project_id = id.clone();
            }
            let exists = match self.get_project_by_id(&id).await {
                Ok(_) => true,
                Err(err) if err.is_not_found() => false,
                Err(err) => return Err(err),
            };
            if exists && !overwrite {
                outcomes.push(ImportOutcome::Skipped { id, name });
                continue;
            }
            match self.save_project(project).await {
                Ok(_) => outcomes.push(ImportOutcome::Imported { id, name }),
                Err(err @ (TrackerError::Validation { .. } | TrackerError::CircularDependency { .. })) => {
                    outcomes.push(ImportOutcome::Failed { id, name, reason: err.to_string() })
                }
                Err(err) => return Err(err),
            }
        }
        info!(count = outcomes.len(), "imported projects");
        Ok(outcomes)
    }

    async fn mutate_project<T, F>(&mut self, project_id: &str, change: F) -> TrackerResult<T>
    where
        F: FnOnce(&mut Project) -> TrackerResult<T>,
    {
        let mut project = self.get_project_by_id(project_id).await?.into_project();
        let result = change(&mut project)?;
        project.updated_at = Some(self.clock.now());
        self.save_project(project).await?;
        Ok(result)
    }

    /// Validates, persists and caches `project`.
    async fn save_project(&mut self, project: Project) -> TrackerResult<ProcessedProject> {
        let today = self.clock.today();
        validate_project(&project, today)?;
        self.persist(&project).await?;
        let processed = ProcessedProject::evaluate(project, today);
        self.upsert(processed.clone());
        Ok(processed)
    }

    async fn persist(&self, project: &Project) -> TrackerResult<()> {
        let record = seal(project, self.clock.now())?;
        match self.store.save(&project.id, &record).await {
            Ok(()) => Ok(()),
            Err(StoreError::QuotaExceeded) => {
                let removed = self.store.cleanup().await?;
                warn!(project = %project.id, removed, "storage quota exceeded, retrying after cleanup");
                self.store.save(&project.id, &record).await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn upsert(&mut self, processed: ProcessedProject) {
        match self.projects.iter_mut().find(|p| p.id() == processed.id()) {
            Some(slot) => *slot = processed,
            None => self.projects.push(processed),
        }
    }
}
