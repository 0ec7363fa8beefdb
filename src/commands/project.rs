use super::{open_center, parse_date_arg};
use crate::{
    libs::{data_center::DuplicateOptions, messages::Message, project::ProjectDraft, task::Priority, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    #[command(about = "List all projects with their derived status")]
    List,
    #[command(about = "Show a project and its tasks")]
    Show { id: String },
    #[command(about = "Create a project")]
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, value_parser = parse_date_arg, help = "Planned start (YYYY-MM-DD)")]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_date_arg, help = "Planned end (YYYY-MM-DD)")]
        end: NaiveDate,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
    },
    #[command(about = "Change a project's name, dates or priority")]
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        #[arg(short, long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    #[command(about = "Find projects by name or description")]
    Search { keyword: String },
    #[command(about = "List unfinished projects due soon")]
    Upcoming {
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    #[command(about = "List unfinished projects past their planned end")]
    Overdue,
    #[command(about = "Create a copy of a project")]
    Duplicate {
        id: String,
        #[arg(long, help = "Copy the project without its tasks")]
        without_tasks: bool,
        #[arg(long, help = "Keep the original planned dates")]
        keep_dates: bool,
        #[arg(long, default_value = "Copy of ")]
        prefix: String,
    },
    #[command(about = "Delete a project and all of its tasks")]
    Delete {
        id: String,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn cmd(project_args: ProjectArgs) -> Result<()> {
    let mut center = open_center().await?;

    match project_args.command {
        ProjectCommand::List => {
            let projects = center.projects();
            if projects.is_empty() {
                msg_info!(Message::NoProjects);
                return Ok(());
            }
            msg_print!(Message::ProjectsHeader, true);
            View::projects(&projects);
        }
        ProjectCommand::Show { id } => {
            let processed = center.get_project_by_id(&id).await?;
            msg_print!(Message::ProjectHeader(processed.project().name.clone()), true);
            View::projects(std::slice::from_ref(&processed));
            if processed.project().tasks.is_empty() {
                msg_info!(Message::NoTasksInProject);
            } else {
                View::tasks(&processed.project().tasks, center.today());
            }
        }
        ProjectCommand::Create {
            name,
            start,
            end,
            description,
            priority,
        } => {
            let draft = ProjectDraft {
                description,
                priority,
                ..ProjectDraft::new(&name, start, end)
            };
            let processed = center.create_project(draft).await?;
            msg_success!(Message::ProjectCreated(name, processed.id().to_string()));
        }
        ProjectCommand::Update {
            id,
            name,
            start,
            end,
            description,
            priority,
        } => {
            if name.is_none() && start.is_none() && end.is_none() && description.is_none() && priority.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            let mut draft = center.get_project_by_id(&id).await?.project().to_draft();
            draft.name = name.unwrap_or(draft.name);
            draft.planned_start = start.or(draft.planned_start);
            draft.planned_end = end.or(draft.planned_end);
            draft.description = description.or(draft.description);
            draft.priority = priority.unwrap_or(draft.priority);
            let processed = center.update_project(&id, draft).await?;
            msg_success!(Message::ProjectUpdated(processed.project().name.clone()));
        }
        ProjectCommand::Search { keyword } => {
            let found = center.search(&keyword);
            if found.is_empty() {
                msg_info!(Message::NoMatchingProjects(keyword));
                return Ok(());
            }
            msg_print!(Message::SearchResultsHeader(keyword), true);
            View::projects(&found);
        }
        ProjectCommand::Upcoming { days } => {
            let upcoming = center.upcoming_projects(days);
            if upcoming.is_empty() {
                msg_info!(Message::NoUpcomingProjects(days));
                return Ok(());
            }
            msg_print!(Message::UpcomingProjectsHeader(days), true);
            View::projects(&upcoming);
        }
        ProjectCommand::Overdue => {
            let overdue = center.overdue_projects();
            if overdue.is_empty() {
                msg_info!(Message::NoOverdueProjects);
                return Ok(());
            }
            msg_print!(Message::OverdueProjectsHeader, true);
            View::projects(&overdue);
        }
        ProjectCommand::Duplicate {
            id,
            without_tasks,
            keep_dates,
            prefix,
        } => {
            let options = DuplicateOptions {
                include_tasks: !without_tasks,
                name_prefix: prefix,
                reset_dates: !keep_dates,
            };
            let copy = center.duplicate_project(&id, options).await?;
            msg_success!(Message::ProjectCopied(copy.project().name.clone(), copy.id().to_string()));
        }
        ProjectCommand::Delete { id, yes } => {
            let name = center.get_project_by_id(&id).await?.project().name.clone();
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteProject(name.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::DeletionCancelled);
                return Ok(());
            }
            center.delete_project(&id).await?;
            msg_success!(Message::ProjectDeleted(name));
        }
    }
    Ok(())
}
