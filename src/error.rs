//! Error types for the dashboard core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the UI boundary.
///
/// Persistence and native-notification failures never show up here; they are
/// absorbed and logged where they happen.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Task not found.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(String),

    /// Meeting not found.
    #[error("meeting not found: {0}")]
    MeetingNotFound(String),

    /// A title was empty after trimming.
    #[error("{0} title cannot be empty")]
    EmptyTitle(&'static str),

    /// Date string was not `YYYY-MM-DD`.
    #[error("invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2024-06-12')")]
    InvalidDate(String),

    /// Time string was not `HH:MM`.
    #[error("invalid time format '{0}'. Use HH:MM (e.g., '10:00')")]
    InvalidTime(String),

    /// Unknown task status.
    #[error("{0}")]
    InvalidStatus(String),

    /// Unknown report period.
    #[error("invalid period '{0}'. Valid periods: day, week, month, year")]
    InvalidPeriod(String),

    /// Scheduler already running.
    #[error("reminder scheduler already started")]
    AlreadyStarted,

    /// Scheduler not running.
    #[error("reminder scheduler not started")]
    NotStarted,

    /// Scheduler task could not be joined.
    #[error("shutdown error: {0}")]
    Shutdown(String),

    /// Configuration file could not be read or parsed.
    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
