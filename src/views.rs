//! Read-only projections for the history timeline and the calendar.

use chrono::{Datelike, NaiveDate};

use crate::model::Task;

/// Tasks split around today
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    /// Due before today, most recent first
    pub past: Vec<Task>,
    /// Due today
    pub present: Vec<Task>,
    /// Due after today, soonest first
    pub future: Vec<Task>,
}

/// Bucket tasks into past / present / future. Tasks with malformed dates are left out.
pub fn history(tasks: &[Task], today: NaiveDate) -> History {
    let mut view = History::default();
    for task in tasks {
        let Some(due) = task.due_date() else {
            continue;
        };
        if due < today {
            view.past.push(task.clone());
        } else if due == today {
            view.present.push(task.clone());
        } else {
            view.future.push(task.clone());
        }
    }

    // Stable: board order is kept among tasks sharing a date
    view.past.sort_by_key(|t| std::cmp::Reverse(t.due_date()));
    view.future.sort_by_key(|t| t.due_date());
    view
}

/// Tasks due on `date`
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks.iter().filter(|t| t.is_due_on(date)).cloned().collect()
}

/// Layout of one month on a Sunday-first calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    /// Empty cells before the 1st (0 when the month starts on Sunday)
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

/// `None` for an invalid year/month
pub fn month_grid(year: i32, month: u32) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(MonthGrid {
        leading_blanks: first.weekday().num_days_from_sunday(),
        days_in_month: (next - first).num_days() as u32,
    })
}

/// Number of tasks due in each month of `year`, January first
pub fn month_counts(tasks: &[Task], year: i32) -> [usize; 12] {
    let mut counts = [0; 12];
    for due in tasks.iter().filter_map(Task::due_date) {
        if due.year() == year {
            counts[due.month0() as usize] += 1;
        }
    }
    counts
}
