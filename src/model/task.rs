use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{format_iso_date, parse_iso_date};

/// Task status on the task board
///
/// Serialized with the labels shown to the user (`PENDING`, `ON-GOING`, `DONE`, `CANCELED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started yet
    #[serde(rename = "PENDING")]
    Pending,
    /// In progress
    #[serde(rename = "ON-GOING")]
    OnGoing,
    /// Completed
    #[serde(rename = "DONE")]
    Done,
    /// Abandoned
    #[serde(rename = "CANCELED")]
    Canceled,
}

impl TaskStatus {
    /// Every status, in board order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::OnGoing,
        TaskStatus::Done,
        TaskStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::OnGoing => "ON-GOING",
            TaskStatus::Done => "DONE",
            TaskStatus::Canceled => "CANCELED",
        }
    }

    /// Pending and on-going tasks still need attention; done and canceled ones never re-alert.
    pub fn is_actionable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::OnGoing)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "PENDING" => Ok(TaskStatus::Pending),
            "ON-GOING" | "ONGOING" => Ok(TaskStatus::OnGoing),
            "DONE" => Ok(TaskStatus::Done),
            "CANCELED" | "CANCELLED" => Ok(TaskStatus::Canceled),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: PENDING, ON-GOING, DONE, CANCELED",
                s
            )),
        }
    }
}

/// A task on the dashboard
///
/// `date` is kept as the raw `YYYY-MM-DD` string. A task whose date does not
/// parse is still stored and listed, it just never matches a report period or
/// a reminder check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Due date (format: YYYY-MM-DD)
    pub date: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub remarks: String,
    /// Whether the reminder scheduler should alert on the due date
    #[serde(default)]
    pub reminder: bool,
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Parsed due date, `None` when the stored string is malformed
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }

    /// String comparison against the ISO rendering of `day`
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.date == format_iso_date(day)
    }
}

/// Fields supplied by the user when creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: TaskStatus,
    pub remarks: String,
    pub reminder: bool,
}

impl NewTask {
    /// A pending task without description, remarks or reminder
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            status: TaskStatus::Pending,
            remarks: String::new(),
            reminder: false,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    pub fn with_reminder(mut self, reminder: bool) -> Self {
        self.reminder = reminder;
        self
    }

    /// Assign a fresh id and creation timestamp
    pub fn into_task(self, created_at: DateTime<Local>) -> Task {
        Task {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            date: format_iso_date(self.date),
            status: self.status,
            remarks: self.remarks,
            reminder: self.reminder,
            created_at,
        }
    }
}
