//! Error types for the tracking engine.
//!
//! Library code reports failures through [`TrackerError`]; the command layer
//! converts them into `anyhow` errors for display.

use thiserror::Error;

/// Result type for engine and facade operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors surfaced by the engine and the data center.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// One or more field rules failed for an entity.
    #[error("{entity} validation failed: {}", .errors.join(", "))]
    Validation { entity: &'static str, errors: Vec<String> },

    /// The dependency relation contains a cycle. The path starts and ends on the same task.
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    /// A requested entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Date text that none of the accepted formats understands.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Failure reported by the record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TrackerError {
    pub fn validation(entity: &'static str, errors: Vec<String>) -> Self {
        TrackerError::Validation { entity, errors }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        TrackerError::NotFound { entity, id: id.into() }
    }

    /// Offending `(task, dependency)` edges of a circular dependency error.
    pub fn cycle_edges(&self) -> Vec<(String, String)> {
        match self {
            TrackerError::CircularDependency { cycle } => cycle.windows(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::NotFound { .. })
    }
}

/// Errors raised by record store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused a write because it is full.
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Generic backend failure.
    #[error("Storage backend failure: {0}")]
    Backend(String),

    /// SQLite failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Record could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Store(StoreError::Serialization(err))
    }
}
