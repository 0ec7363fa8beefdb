use super::{open_center, parse_date_arg};
use crate::{
    libs::{
        error::TrackerError,
        graph::DependencyGraph,
        messages::Message,
        task::{Priority, Task, TaskDraft},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    #[command(about = "Add a task to a project")]
    Add {
        project: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, value_parser = parse_date_arg)]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_date_arg)]
        end: NaiveDate,
        #[arg(long = "depends-on", help = "Id of a task this one waits for (repeatable)")]
        depends_on: Vec<String>,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        #[arg(short, long)]
        assignee: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        milestone: bool,
    },
    #[command(about = "Change a task's name, plan or priority")]
    Update {
        project: String,
        task: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        #[arg(short, long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(short, long)]
        assignee: Option<String>,
        #[arg(long)]
        progress: Option<u8>,
    },
    #[command(about = "Remove a task")]
    Remove { project: String, task: String },
    #[command(about = "Record the actual start of a task")]
    Start {
        project: String,
        task: String,
        #[arg(short, long, value_parser = parse_date_arg, help = "Defaults to today")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Record the actual end of a task")]
    Done {
        project: String,
        task: String,
        #[arg(short, long, value_parser = parse_date_arg, help = "Defaults to today")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Replace the dependencies of a task")]
    Deps {
        project: String,
        task: String,
        #[arg(help = "Ids of the tasks to wait for; none clears the list")]
        depends_on: Vec<String>,
    },
    #[command(about = "Show every task a task transitively waits for")]
    Chain { project: String, task: String },
}

pub async fn cmd(task_args: TaskArgs) -> Result<()> {
    let mut center = open_center().await?;

    match task_args.command {
        TaskCommand::Add {
            project,
            name,
            start,
            end,
            depends_on,
            priority,
            assignee,
            description,
            milestone,
        } => {
            let draft = TaskDraft {
                dependencies: depends_on.into_iter().collect(),
                priority,
                assignee,
                description,
                is_milestone: milestone,
                ..TaskDraft::new(&name, start, end)
            };
            let task = center.add_task(&project, draft).await?;
            msg_success!(Message::TaskAdded(task.name, task.id));
        }
        TaskCommand::Update {
            project,
            task,
            name,
            start,
            end,
            priority,
            assignee,
            progress,
        } => {
            let processed = center.get_project_by_id(&project).await?;
            let Some(current) = processed.project().task(&task) else {
                return Err(TrackerError::not_found("Task", &task).into());
            };
            let mut draft = current.to_draft();
            if name.is_none() && start.is_none() && end.is_none() && priority.is_none() && assignee.is_none() && progress.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            draft.name = name.unwrap_or(draft.name);
            draft.planned_start = start.or(draft.planned_start);
            draft.planned_end = end.or(draft.planned_end);
            draft.priority = priority.unwrap_or(draft.priority);
            draft.assignee = assignee.or(draft.assignee);
            draft.progress = progress.unwrap_or(draft.progress);
            let updated = center.update_task(&project, &task, draft).await?;
            msg_success!(Message::TaskUpdated(updated.name));
        }
        TaskCommand::Remove { project, task } => {
            let removed = center.remove_task(&project, &task).await?;
            msg_success!(Message::TaskRemoved(removed.name));
        }
        TaskCommand::Start { project, task, date } => {
            let started = center.start_task(&project, &task, date).await?;
            msg_success!(Message::TaskStarted(started.name.clone(), started.actual_start.map(|d| d.to_string()).unwrap_or_default()));
        }
        TaskCommand::Done { project, task, date } => {
            let done = center.complete_task(&project, &task, date).await?;
            msg_success!(Message::TaskCompleted(done.name.clone(), done.actual_end.map(|d| d.to_string()).unwrap_or_default()));
        }
        TaskCommand::Deps { project, task, depends_on } => {
            let mut tasks = center.get_project_by_id(&project).await?.into_project().tasks;
            if let Some(current) = tasks.iter_mut().find(|t| t.id == task) {
                current.dependencies.clear();
            }
            let graph = DependencyGraph::build(&tasks);
            if let Some(dep) = depends_on.iter().find(|dep| graph.would_create_cycle(&task, dep)) {
                msg_bail_anyhow!(Message::DependencyWouldCycle(task.clone(), dep.clone()));
            }
            let updated = center.set_task_dependencies(&project, &task, depends_on.into_iter().collect()).await?;
            msg_success!(Message::DependenciesUpdated(updated.name));
        }
        TaskCommand::Chain { project, task } => {
            let chain = center.dependency_chain(&project, &task).await?;
            let processed = center.get_project_by_id(&project).await?;
            let tasks = &processed.project().tasks;
            let name = processed.project().task(&task).map(|t| t.name.clone()).unwrap_or_else(|| task.clone());

            msg_print!(Message::DependencyChainHeader(name.clone()), true);
            if chain.is_empty() {
                msg_info!(Message::NoDependencies);
            } else {
                View::tasks(&chain, center.today());
            }

            let dependents: Vec<Task> = DependencyGraph::build(tasks).dependents(&task).iter().filter_map(|id| processed.project().task(id).cloned()).collect();
            if !dependents.is_empty() {
                msg_print!(Message::DependentsHeader(name), true);
                View::tasks(&dependents, center.today());
            }
        }
    }
    Ok(())
}
