use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{format_iso_date, parse_iso_date};

const TIME_FORMAT: &str = "%H:%M";

/// A scheduled meeting
///
/// Meetings are stored and listed but take no part in reminders or reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    /// Meeting date (format: YYYY-MM-DD)
    pub date: String,
    /// Start time (format: HH:MM)
    pub time: String,
    #[serde(default)]
    pub description: String,
    /// Platform or location, e.g. "Google Meet"
    #[serde(default)]
    pub platform: String,
}

impl Meeting {
    /// Start of the meeting, `None` if the date or time is malformed
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let date = parse_iso_date(&self.date)?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()?;
        Some(date.and_time(time))
    }
}

/// Fields supplied by the user when scheduling a meeting
#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub description: String,
    pub platform: String,
}

impl NewMeeting {
    pub fn into_meeting(self) -> Meeting {
        Meeting {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            date: format_iso_date(self.date),
            time: self.time.format(TIME_FORMAT).to_string(),
            description: self.description,
            platform: self.platform,
        }
    }
}
