pub mod export;
pub mod gantt;
pub mod import;
pub mod init;
pub mod project;
pub mod remind;
pub mod schedule;
pub mod stats;
pub mod task;

use crate::db::{db::Db, records::SqliteStore};
use crate::libs::calendar::parse_date;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::data_center::DataCenter;
use crate::msg_debug;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// The data center used by every command: SQLite store, wall clock, user config.
pub type Center = DataCenter<SqliteStore, SystemClock>;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Manage tasks of a project")]
    Task(task::TaskArgs),
    #[command(about = "Reschedule a project's tasks after their dependencies")]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Show project and task statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "List upcoming deadlines and overdue tasks")]
    Remind(remind::RemindArgs),
    #[command(about = "Draw a Gantt chart of a project")]
    Gantt(gantt::GanttArgs),
    #[command(about = "Export all projects as JSON")]
    Export(export::ExportArgs),
    #[command(about = "Import projects from a JSON export")]
    Import(import::ImportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Project(args) => project::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Schedule(args) => schedule::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args).await,
            Commands::Remind(args) => remind::cmd(args).await,
            Commands::Gantt(args) => gantt::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            Commands::Import(args) => import::cmd(args).await,
        }
    }
}

/// Opens the configured store and loads every project.
pub async fn open_center() -> Result<Center> {
    let config = Config::read()?;
    let store = SqliteStore::new(Db::new()?, &config.store.collection)?.with_max_records(config.store.max_records);
    let mut center = DataCenter::new(store, SystemClock, &config)?;
    let count = center.load_all_projects().await?.len();
    msg_debug!(format!("{} projects loaded from collection '{}'", count, config.store.collection));
    Ok(center)
}

/// clap value parser for date arguments.
pub fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}
