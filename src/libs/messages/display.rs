//! Text for every [`Message`] variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION ===
            Message::ConfigWizardHeader => "Configure pmt. Press Enter to keep the current value.".to_string(),
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::PromptReminderDays => "Reminder thresholds in days (comma separated)".to_string(),
            Message::PromptWorkdays => "Select workdays".to_string(),
            Message::PromptGanttUnit => "Gantt chart unit".to_string(),
            Message::PromptMaxRecords => "Maximum stored projects (0 for unlimited)".to_string(),

            // === PROJECTS ===
            Message::ProjectsHeader => "Projects:".to_string(),
            Message::NoProjects => "No projects yet. Create one with `pmt project create`.".to_string(),
            Message::ProjectHeader(name) => format!("Project '{}'", name),
            Message::ProjectCreated(name, id) => format!("Project '{}' created with id {}", name, id),
            Message::ProjectUpdated(name) => format!("Project '{}' updated", name),
            Message::ProjectDeleted(name) => format!("Project '{}' deleted", name),
            Message::ConfirmDeleteProject(name) => format!("Delete project '{}' and all of its tasks?", name),
            Message::DeletionCancelled => "Deletion cancelled".to_string(),
            Message::ProjectCopied(name, id) => format!("Project '{}' created as a copy with id {}", name, id),
            Message::SearchResultsHeader(keyword) => format!("Projects matching '{}':", keyword),
            Message::NoMatchingProjects(keyword) => format!("No project matches '{}'", keyword),
            Message::UpcomingProjectsHeader(days) => format!("Projects due within {} days:", days),
            Message::NoUpcomingProjects(days) => format!("No project is due within {} days", days),
            Message::OverdueProjectsHeader => "Overdue projects:".to_string(),
            Message::NoOverdueProjects => "No overdue projects".to_string(),
            Message::NoTasksInProject => "This project has no tasks".to_string(),

            // === TASKS ===
            Message::TaskAdded(name, id) => format!("Task '{}' added with id {}", name, id),
            Message::TaskUpdated(name) => format!("Task '{}' updated", name),
            Message::TaskRemoved(name) => format!("Task '{}' removed", name),
            Message::TaskStarted(name, date) => format!("Task '{}' started on {}", name, date),
            Message::TaskCompleted(name, date) => format!("Task '{}' completed on {}", name, date),
            Message::DependenciesUpdated(name) => format!("Dependencies of '{}' updated", name),
            Message::DependencyChainHeader(name) => format!("'{}' depends on:", name),
            Message::DependentsHeader(name) => format!("Waiting on '{}':", name),
            Message::DependencyWouldCycle(task, dep) => format!("'{}' cannot wait for '{}': '{}' already depends on it", task, dep, dep),
            Message::NoDependencies => "No dependencies".to_string(),
            Message::NothingToUpdate => "Nothing to update: no fields were given".to_string(),

            // === SCHEDULING ===
            Message::ScheduleHeader(name) => format!("Auto-scheduling '{}'", name),
            Message::ScheduleSummary { moved, failed } => format!("{} task(s) moved, {} could not be scheduled", moved, failed),
            Message::ScheduleTaskFailed(task, reason) => format!("Task '{}' kept its dates: {}", task, reason),

            // === STATISTICS AND REMINDERS ===
            Message::ProjectStatisticsHeader => "Project statistics".to_string(),
            Message::TaskStatisticsHeader => "Task statistics".to_string(),
            Message::RemindersHeader(days) => format!("Due within {} days", days),
            Message::NoReminders(days) => format!("Nothing due within {} days", days),
            Message::OverdueHeader => "Overdue tasks".to_string(),
            Message::NoOverdueTasks => "No overdue tasks".to_string(),
            Message::GanttHeader(name, unit) => format!("Gantt chart for '{}' ({})", name, unit),

            // === EXPORT / IMPORT ===
            Message::ExportCompleted(path, count) => format!("Exported {} project(s) to {}", count, path),
            Message::ImportCompleted { imported, skipped } => format!("Imported {} project(s), skipped {}", imported, skipped),
            Message::ImportProjectFailed(name, reason) => format!("Project '{}' was not imported: {}", name, reason),
            Message::ImportFileUnreadable(path) => format!("Cannot read export file {}", path),
        };
        write!(f, "{}", text)
    }
}
