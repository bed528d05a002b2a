use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry in the in-app notification log
///
/// Title, message and creation time are fixed at construction; the only
/// mutation is the one-way unread → read transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppNotification {
    id: String,
    title: String,
    message: String,
    created_at: DateTime<Local>,
    read: bool,
}

impl AppNotification {
    /// Create an unread notification
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            created_at,
            read: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub(crate) fn mark_read(&mut self) {
        self.read = true;
    }
}
