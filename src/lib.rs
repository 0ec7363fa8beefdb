//! # pmt - Project Milestone Tracker
//!
//! pmt turns raw project and task records (planned dates, actual dates and
//! dependency links) into derived status, completion and overdue statistics,
//! deadline reminders, Gantt layout and dependency-aware schedules.
//!
//! ## Layout
//!
//! - [`libs`]: the engine, the [`DataCenter`](libs::data_center::DataCenter) facade and supporting infrastructure
//! - [`db`]: SQLite implementation of the record store
//! - [`commands`]: the `pmt` command-line interface
//!
//! ## Example
//!
//! ```rust,no_run
//! use pmt::commands::Cli;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
