//! Validation helpers for user input
//!
//! Parsing of dates, times, statuses and report periods as typed at the UI
//! boundary or on the command line.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{DashboardError, Result};
use crate::model::{TaskStatus, parse_iso_date};
use crate::report::ReportPeriod;

/// Parse and validate a task status
///
/// # Arguments
/// * `status_str` - Status label (e.g., "PENDING", "on-going")
pub fn parse_status(status_str: &str) -> Result<TaskStatus> {
    status_str
        .parse::<TaskStatus>()
        .map_err(DashboardError::InvalidStatus)
}

/// Parse and validate a date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    parse_iso_date(date_str.trim())
        .ok_or_else(|| DashboardError::InvalidDate(date_str.to_string()))
}

/// Parse and validate a time of day in HH:MM format
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str.trim(), "%H:%M")
        .map_err(|_| DashboardError::InvalidTime(time_str.to_string()))
}

/// Parse a report period (day, week, month, year), case-insensitive
pub fn parse_period(period_str: &str) -> Result<ReportPeriod> {
    period_str
        .parse::<ReportPeriod>()
        .map_err(DashboardError::InvalidPeriod)
}
