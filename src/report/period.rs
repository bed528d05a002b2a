//! Reporting periods and their date ranges.
//!
//! DAY, MONTH and YEAR follow the calendar. WEEK is a Tuesday-to-Monday
//! workweek: the range runs from the most recent Tuesday at or before the
//! reference date through the following Monday, and tasks dated on the
//! Saturday or Sunday inside that range never match.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::Task;

/// Report granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Day,
        ReportPeriod::Week,
        ReportPeriod::Month,
        ReportPeriod::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "DAY",
            ReportPeriod::Week => "WEEK",
            ReportPeriod::Month => "MONTH",
            ReportPeriod::Year => "YEAR",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(ReportPeriod::Day),
            "WEEK" => Ok(ReportPeriod::Week),
            "MONTH" => Ok(ReportPeriod::Month),
            "YEAR" => Ok(ReportPeriod::Year),
            _ => Err(s.to_string()),
        }
    }
}

/// Inclusive date range covered by a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Most recent Tuesday at or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // 0 = Sunday .. 6 = Saturday; Tuesday is 2
    let weekday = date.weekday().num_days_from_sunday() as u64;
    let days_since_tuesday = (weekday + 7 - 2) % 7;
    date.checked_sub_days(Days::new(days_since_tuesday))
        .unwrap_or(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Inclusive range that `period` denotes around `reference`
pub fn period_range(period: ReportPeriod, reference: NaiveDate) -> PeriodRange {
    let year = reference.year();
    let month = reference.month();

    match period {
        ReportPeriod::Day => PeriodRange {
            start: reference,
            end: reference,
        },
        ReportPeriod::Week => {
            let start = week_start(reference);
            PeriodRange {
                start,
                end: start.checked_add_days(Days::new(6)).unwrap_or(start),
            }
        }
        ReportPeriod::Month => PeriodRange {
            start: reference.with_day(1).unwrap_or(reference),
            end: last_day_of_month(year, month).unwrap_or(reference),
        },
        ReportPeriod::Year => PeriodRange {
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(reference),
            end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(reference),
        },
    }
}

/// Whether `task` belongs in the `period` report around `reference`.
///
/// Tasks with malformed dates never match.
pub fn task_in_period(task: &Task, period: ReportPeriod, reference: NaiveDate) -> bool {
    match period {
        ReportPeriod::Day => task.is_due_on(reference),
        ReportPeriod::Week => {
            let range = period_range(period, reference);
            task.due_date()
                .is_some_and(|due| range.contains(due) && !is_weekend(due))
        }
        ReportPeriod::Month => task.due_date().is_some_and(|due| {
            due.year() == reference.year() && due.month() == reference.month()
        }),
        ReportPeriod::Year => task
            .due_date()
            .is_some_and(|due| due.year() == reference.year()),
    }
}

/// Matching tasks, in their original order
pub fn filter_tasks(tasks: &[Task], period: ReportPeriod, reference: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| task_in_period(t, period, reference))
        .cloned()
        .collect()
}

/// Human-readable description of the report period
pub fn range_label(period: ReportPeriod, reference: NaiveDate) -> String {
    match period {
        ReportPeriod::Day => reference.format("%A, %B %-d, %Y").to_string(),
        ReportPeriod::Week => {
            let range = period_range(period, reference);
            format!(
                "{} - {} (Tue-Mon, Excluding Weekends)",
                range.start.format("%B %-d"),
                range.end.format("%B %-d, %Y")
            )
        }
        ReportPeriod::Month => reference.format("%B %Y").to_string(),
        ReportPeriod::Year => reference.year().to_string(),
    }
}
