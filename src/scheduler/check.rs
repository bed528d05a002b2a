//! One reminder check ("tick").
//!
//! A task qualifies when it is due today (string equality on `YYYY-MM-DD`),
//! has its reminder flag set, and is still PENDING or ON-GOING.
//!
//! In-app reminders are deduplicated per task title per calendar day against
//! the notification log. The native notification is not: it fires on every
//! tick that finds at least one qualifying task.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

use crate::model::{AppNotification, Task};
use crate::notifications::{NotificationLog, SharedLog};
use crate::notifier::{Notifier, Permission};
use crate::store::EntityStore;

/// Title of the native notification
pub const NATIVE_TITLE: &str = "OmniTask Reminder";
/// Stable tag passed with every native notification
pub const NATIVE_TAG: &str = "omnitask-daily-reminder";

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Tasks that qualified this tick
    pub due: usize,
    /// New entries appended to the notification log
    pub appended: usize,
    /// Whether a native notification was shown
    pub native_sent: bool,
}

/// In-app title for a task reminder; also the dedup key
pub fn reminder_title(task: &Task) -> String {
    format!("Reminder: {}", task.title)
}

pub fn reminder_message(task: &Task) -> String {
    format!("This task is due today. Status: {}", task.status)
}

/// Body of the native summary notification, `None` when nothing is due
pub fn native_body(due: &[&Task]) -> Option<String> {
    match due {
        [] => None,
        [task] => Some(reminder_title(task)),
        _ => Some(format!("You have {} tasks due today!", due.len())),
    }
}

/// Tasks that qualify for a reminder on `today`
pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.is_due_on(today) && t.reminder && t.status.is_actionable())
        .collect()
}

/// Whether the log already holds `title` created on `today`
pub fn already_notified(log: &NotificationLog, title: &str, today: NaiveDate) -> bool {
    log.entries()
        .iter()
        .any(|n| n.title() == title && n.created_at().date_naive() == today)
}

/// Build the in-app batch for `due`, skipping tasks already reminded today
pub fn new_reminders(
    due: &[&Task],
    log: &NotificationLog,
    now: DateTime<Local>,
) -> Vec<AppNotification> {
    let today = now.date_naive();
    due.iter()
        .filter_map(|task| {
            let title = reminder_title(task);
            if already_notified(log, &title, today) {
                None
            } else {
                Some(AppNotification::new(title, reminder_message(task), now))
            }
        })
        .collect()
}

/// Everything a tick needs, cheap to clone into the scheduler task
#[derive(Clone)]
pub struct ReminderCheck {
    store: Arc<EntityStore>,
    log: SharedLog,
    notifier: Arc<dyn Notifier>,
}

impl ReminderCheck {
    pub fn new(store: Arc<EntityStore>, log: SharedLog, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            log,
            notifier,
        }
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Run one tick as of `now`
    pub fn run_at(&self, now: DateTime<Local>) -> TickOutcome {
        let tasks = self.store.tasks();
        let due = due_today(&tasks, now.date_naive());

        if due.is_empty() {
            debug!(today = %now.date_naive(), "no reminders due");
            return TickOutcome::default();
        }

        let native_sent = self.notify_native(&due);

        // Dedup check and append under one guard
        let appended = {
            let mut log = self.log.lock();
            let batch = new_reminders(&due, &log, now);
            let count = batch.len();
            log.append(batch);
            count
        };

        info!(due = due.len(), appended, native_sent, "reminder check");

        TickOutcome {
            due: due.len(),
            appended,
            native_sent,
        }
    }

    fn notify_native(&self, due: &[&Task]) -> bool {
        if self.notifier.permission() != Permission::Granted {
            return false;
        }
        match native_body(due) {
            Some(body) => {
                self.notifier.show(NATIVE_TITLE, &body, NATIVE_TAG);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, TaskStatus};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn task(title: &str, date: NaiveDate, status: TaskStatus, reminder: bool) -> Task {
        NewTask::new(title, date)
            .with_status(status)
            .with_reminder(reminder)
            .into_task(at(2024, 1, 1, 9))
    }

    #[test]
    fn test_due_today_predicate() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let tasks = vec![
            task("pending", today, TaskStatus::Pending, true),
            task("ongoing", today, TaskStatus::OnGoing, true),
            task("done", today, TaskStatus::Done, true),
            task("canceled", today, TaskStatus::Canceled, true),
            task("no reminder", today, TaskStatus::Pending, false),
            task("tomorrow", tomorrow, TaskStatus::Pending, true),
        ];

        let titles: Vec<&str> = due_today(&tasks, today)
            .into_iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["pending", "ongoing"]);
    }

    #[test]
    fn test_native_body_phrasing() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let a = task("Submit Budget", today, TaskStatus::Pending, true);
        let b = task("Client Review", today, TaskStatus::Pending, true);

        assert_eq!(native_body(&[]), None);
        assert_eq!(
            native_body(&[&a]).as_deref(),
            Some("Reminder: Submit Budget")
        );
        assert_eq!(
            native_body(&[&a, &b]).as_deref(),
            Some("You have 2 tasks due today!")
        );
    }

    #[test]
    fn test_reminder_text() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let t = task("Submit Budget", today, TaskStatus::OnGoing, true);
        assert_eq!(reminder_title(&t), "Reminder: Submit Budget");
        assert_eq!(
            reminder_message(&t),
            "This task is due today. Status: ON-GOING"
        );
    }

    #[test]
    fn test_new_reminders_skips_same_day_duplicates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let t = task("Submit Budget", today, TaskStatus::Pending, true);
        let mut log = NotificationLog::new();

        let first = new_reminders(&[&t], &log, at(2024, 6, 12, 9));
        assert_eq!(first.len(), 1);
        log.append(first);

        let second = new_reminders(&[&t], &log, at(2024, 6, 12, 10));
        assert!(second.is_empty());
    }

    #[test]
    fn test_new_reminders_yesterday_entry_does_not_block() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let t = task("Submit Budget", today, TaskStatus::Pending, true);
        let mut log = NotificationLog::new();
        log.append(vec![AppNotification::new(
            "Reminder: Submit Budget",
            "old",
            at(2024, 6, 11, 9),
        )]);

        assert_eq!(new_reminders(&[&t], &log, at(2024, 6, 12, 9)).len(), 1);
    }
}
