use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub updated_at: DateTime<Local>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            updated_at: now,
        }
    }
}
