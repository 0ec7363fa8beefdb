//! Typed user-facing messages.
//!
//! Every line pmt prints to the user is a variant of [`Message`]; the text
//! itself lives in [`super::display`]. Variants are grouped by command.

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION ===
    ConfigWizardHeader,
    ConfigSaved,
    PromptReminderDays,
    PromptWorkdays,
    PromptGanttUnit,
    PromptMaxRecords,

    // === PROJECTS ===
    ProjectsHeader,
    NoProjects,
    ProjectHeader(String),
    ProjectCreated(String, String), // name, id
    ProjectUpdated(String),
    ProjectDeleted(String),
    ConfirmDeleteProject(String),
    DeletionCancelled,
    NoTasksInProject,
    ProjectCopied(String, String), // name, id
    SearchResultsHeader(String),
    NoMatchingProjects(String),
    UpcomingProjectsHeader(u32),
    NoUpcomingProjects(u32),
    OverdueProjectsHeader,
    NoOverdueProjects,

    // === TASKS ===
    TaskAdded(String, String), // name, id
    TaskUpdated(String),
    TaskRemoved(String),
    TaskStarted(String, String),   // name, date
    TaskCompleted(String, String), // name, date
    DependenciesUpdated(String),
    DependencyChainHeader(String),
    DependentsHeader(String),
    DependencyWouldCycle(String, String), // task, dependency
    NoDependencies,
    NothingToUpdate,

    // === SCHEDULING ===
    ScheduleHeader(String),
    ScheduleSummary { moved: usize, failed: usize },
    ScheduleTaskFailed(String, String), // task, reason

    // === STATISTICS AND REMINDERS ===
    ProjectStatisticsHeader,
    TaskStatisticsHeader,
    RemindersHeader(u32),
    NoReminders(u32),
    OverdueHeader,
    NoOverdueTasks,
    GanttHeader(String, String), // project, unit

    // === EXPORT / IMPORT ===
    ExportCompleted(String, usize), // path, count
    ImportCompleted { imported: usize, skipped: usize },
    ImportProjectFailed(String, String), // name, reason
    ImportFileUnreadable(String),
}
