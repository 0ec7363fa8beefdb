//! Core library modules for pmt.
//!
//! ## Features
//!
//! - **Engine**: calendar arithmetic, status rules, dependency graph, auto-scheduler, statistics
//! - **Model**: project and task records, validation
//! - **Facade**: the data center over a pluggable record store
//! - **Infrastructure**: configuration, data storage paths, messages, console views
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use pmt::libs::clock::SystemClock;
//! use pmt::libs::config::Config;
//! use pmt::libs::data_center::DataCenter;
//! use pmt::libs::project::ProjectDraft;
//! use pmt::libs::store::MemoryStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut center = DataCenter::new(MemoryStore::new(), SystemClock, &Config::default())?;
//! let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap();
//! let project = center.create_project(ProjectDraft::new("Website relaunch", start, end)).await?;
//! println!("{}", project.calculated_status());
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod clock;
pub mod config;
pub mod data_center;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod graph;
pub mod messages;
pub mod project;
pub mod scheduler;
pub mod statistics;
pub mod status;
pub mod store;
pub mod task;
pub mod validation;
pub mod view;
