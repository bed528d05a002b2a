//! Dashboard domain models
//!
//! - `task`: tasks with due dates, status and reminder flag
//! - `note`: free-form notes
//! - `meeting`: scheduled meetings
//! - `notification`: in-app notifications raised by the reminder scheduler

mod meeting;
mod note;
mod notification;
mod task;

pub use meeting::{Meeting, NewMeeting};
pub use note::Note;
pub use notification::AppNotification;
pub use task::{NewTask, Task, TaskStatus};

use chrono::{Local, NaiveDate};

/// Calendar date format used for every stored date (`YYYY-MM-DD`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a date the way it is stored on tasks and meetings
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date, returning `None` when malformed
///
/// Strict: the value must be exactly what [`format_iso_date`] produces, so
/// padding, surrounding whitespace and unpadded fields are all rejected.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()?;
    (format_iso_date(date) == value).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2024-06-12"),
            NaiveDate::from_ymd_opt(2024, 6, 12)
        );
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("not a date"), None);
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date(" 2024-06-12"), None);
        assert_eq!(parse_iso_date("2024-6-12"), None);
    }

    #[test]
    fn test_format_iso_date_pads_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_iso_date(date), "2024-03-01");
    }
}
