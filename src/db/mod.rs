//! Database layer for pmt.
//!
//! pmt keeps one SQLite file, `pmt.db`, in the platform data directory.
//! Projects are stored as opaque JSON records through [`records::SqliteStore`],
//! which implements the [`RecordStore`](crate::libs::store::RecordStore) contract.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pmt::db::{db::Db, records::SqliteStore};
//!
//! let store = SqliteStore::new(Db::new()?, "projects")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management.
pub mod db;

/// Record store on top of the `records` table.
pub mod records;
