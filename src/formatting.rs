//! Plain-text rendering for the command line
//!
//! This module contains formatting logic for displaying tasks, reports,
//! notifications and the history timeline.

use crate::model::{AppNotification, Meeting, Task};
use crate::report::Report;
use crate::views::History;

fn push_task(result: &mut String, task: &Task) {
    result.push_str(&format!(
        "- [{}] {} (status: {}, date: {})\n",
        task.id, task.title, task.status, task.date
    ));
    if !task.description.is_empty() {
        result.push_str(&format!("  Description: {}\n", task.description));
    }
    if !task.remarks.is_empty() {
        result.push_str(&format!("  Remarks: {}\n", task.remarks));
    }
    if task.reminder {
        result.push_str("  Reminder set\n");
    }
}

/// Format tasks into a display string
///
/// # Arguments
/// * `tasks` - Tasks to format, in display order
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        push_task(&mut result, task);
    }
    result
}

/// Format a report with its header and matching tasks
pub fn format_report(report: &Report) -> String {
    let mut result = format!("OmniTask Report ({})\nPeriod: {}\n\n", report.period, report.label);
    if report.is_empty() {
        result.push_str("No tasks found for this period.\n");
        return result;
    }
    for task in &report.tasks {
        push_task(&mut result, task);
    }
    result
}

/// Format the notification log, newest first, unread entries flagged
pub fn format_notifications(notifications: &[AppNotification]) -> String {
    if notifications.is_empty() {
        return "No notifications yet.".to_string();
    }

    let unread = notifications.iter().filter(|n| !n.is_read()).count();
    let mut result = format!(
        "{} notification(s), {} unread:\n\n",
        notifications.len(),
        unread
    );
    for n in notifications {
        let marker = if n.is_read() { " " } else { "*" };
        result.push_str(&format!(
            "{} {} [{}]\n  {}\n",
            marker,
            n.title(),
            n.created_at().format("%Y-%m-%d %H:%M"),
            n.message()
        ));
    }
    result
}

/// Format meetings split into upcoming and past
pub fn format_meetings(upcoming: &[Meeting], past: &[Meeting]) -> String {
    if upcoming.is_empty() && past.is_empty() {
        return "No meetings scheduled".to_string();
    }

    let mut result = String::new();
    for (heading, meetings) in [("Upcoming", upcoming), ("Past", past)] {
        result.push_str(&format!("{} ({})\n", heading, meetings.len()));
        for m in meetings {
            result.push_str(&format!("- [{}] {} ({} {})", m.id, m.title, m.date, m.time));
            if !m.platform.is_empty() {
                result.push_str(&format!(" on {}", m.platform));
            }
            result.push('\n');
        }
        result.push('\n');
    }
    result
}

/// Format the past / today / future timeline
pub fn format_history(history: &History) -> String {
    let mut result = String::new();
    for (heading, tasks) in [
        ("Past", &history.past),
        ("Today", &history.present),
        ("Future", &history.future),
    ] {
        result.push_str(&format!("{} ({})\n", heading, tasks.len()));
        if tasks.is_empty() {
            result.push_str("  nothing here\n");
        }
        for task in tasks {
            push_task(&mut result, task);
        }
        result.push('\n');
    }
    result
}
