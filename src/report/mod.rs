//! Report period engine
//!
//! Pure functions: the same tasks, period and reference date always produce
//! the same range, label and matching set.

mod export;
mod period;

pub use export::{ExportFormat, export_file_name, render, to_csv, to_word_html};
pub use period::{
    PeriodRange, ReportPeriod, filter_tasks, period_range, range_label, task_in_period,
    week_start,
};

use chrono::NaiveDate;

use crate::error::{DashboardError, Result};
use crate::model::{Task, parse_iso_date};

/// Tasks matching one period, with the range and label they were selected by
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub period: ReportPeriod,
    pub reference: NaiveDate,
    pub range: PeriodRange,
    pub label: String,
    pub tasks: Vec<Task>,
}

impl Report {
    pub fn build(tasks: &[Task], period: ReportPeriod, reference: NaiveDate) -> Self {
        Self {
            period,
            reference,
            range: period_range(period, reference),
            label: range_label(period, reference),
            tasks: filter_tasks(tasks, period, reference),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Build a report from a `YYYY-MM-DD` reference string
pub fn generate_report(tasks: &[Task], period: ReportPeriod, reference: &str) -> Result<Report> {
    let reference_date =
        parse_iso_date(reference).ok_or_else(|| DashboardError::InvalidDate(reference.to_string()))?;
    Ok(Report::build(tasks, period, reference_date))
}
