//! Reminder scheduler tests
mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use common::{RecordingNotifier, add_reminder_task, date, empty_task_store, new_log};
use omnitask::model::local_date_today;
use omnitask::scheduler::{NATIVE_TAG, NATIVE_TITLE, ReminderCheck};
use omnitask::{DashboardError, NewTask, ReminderScheduler, SchedulerConfig, TaskStatus};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn test_single_due_task_creates_one_unread_entry() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);

    let check = ReminderCheck::new(store, log.clone(), notifier.clone());
    let outcome = check.run_at(at(2024, 6, 12, 9));

    assert_eq!(outcome.due, 1);
    assert_eq!(outcome.appended, 1);
    assert!(outcome.native_sent);

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title(), "Reminder: Pay rent");
    assert_eq!(entries[0].message(), "This task is due today. Status: PENDING");
    assert!(!entries[0].is_read());
    assert_eq!(log.unread_count(), 1);

    let shown = notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, NATIVE_TITLE);
    assert_eq!(shown[0].body, "Reminder: Pay rent");
    assert_eq!(shown[0].tag, NATIVE_TAG);
}

#[test]
fn test_two_due_tasks_one_plural_native_call() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);
    add_reminder_task(&store, "Call bank", date(2024, 6, 12), TaskStatus::OnGoing);

    let check = ReminderCheck::new(store, log.clone(), notifier.clone());
    let outcome = check.run_at(at(2024, 6, 12, 9));

    assert_eq!(outcome.appended, 2);
    assert_eq!(log.snapshot().len(), 2);

    let shown = notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].body, "You have 2 tasks due today!");
}

#[test]
fn test_same_day_ticks_dedup_in_app_but_not_native() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);

    let check = ReminderCheck::new(store, log.clone(), notifier.clone());
    check.run_at(at(2024, 6, 12, 9));
    let second = check.run_at(at(2024, 6, 12, 10));

    assert_eq!(second.due, 1);
    assert_eq!(second.appended, 0);
    assert_eq!(log.snapshot().len(), 1);
    assert_eq!(notifier.shown().len(), 2);
}

#[test]
fn test_next_day_is_not_deduplicated_against_yesterday() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Standup", date(2024, 6, 12), TaskStatus::Pending);
    add_reminder_task(&store, "Standup", date(2024, 6, 13), TaskStatus::Pending);

    let check = ReminderCheck::new(store, log.clone(), notifier);
    assert_eq!(check.run_at(at(2024, 6, 12, 9)).appended, 1);
    assert_eq!(check.run_at(at(2024, 6, 13, 9)).appended, 1);
    assert_eq!(log.snapshot().len(), 2);
}

#[test]
fn test_concurrent_ticks_append_once() {
    let store = empty_task_store();
    let log = new_log();
    add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);
    let check = ReminderCheck::new(store, log.clone(), RecordingNotifier::granted());
    let now = at(2024, 6, 12, 9);

    let appended: usize = std::thread::scope(|s| {
        let workers: Vec<_> = (0..16)
            .map(|_| s.spawn(|| check.run_at(now).appended))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).sum()
    });

    assert_eq!(appended, 1);
    assert_eq!(log.snapshot().len(), 1);
}

#[test]
fn test_done_and_canceled_tasks_are_ignored() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Finished", date(2024, 6, 12), TaskStatus::Done);
    add_reminder_task(&store, "Dropped", date(2024, 6, 12), TaskStatus::Canceled);
    store
        .add_task(NewTask::new("No reminder", date(2024, 6, 12)))
        .unwrap();

    let check = ReminderCheck::new(store, log.clone(), notifier.clone());
    let outcome = check.run_at(at(2024, 6, 12, 9));

    assert_eq!(outcome.due, 0);
    assert!(!outcome.native_sent);
    assert!(log.snapshot().is_empty());
    assert!(notifier.shown().is_empty());
}

#[test]
fn test_status_change_to_done_stops_reminders() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    let id = add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);

    let check = ReminderCheck::new(Arc::clone(&store), log, notifier.clone());
    check.run_at(at(2024, 6, 12, 9));
    store.set_task_status(&id, TaskStatus::Done).unwrap();
    let outcome = check.run_at(at(2024, 6, 12, 10));

    assert_eq!(outcome.due, 0);
    assert_eq!(notifier.shown().len(), 1);
}

#[test]
fn test_denied_permission_still_logs_in_app() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::denied();
    add_reminder_task(&store, "Pay rent", date(2024, 6, 12), TaskStatus::Pending);

    let check = ReminderCheck::new(store, log.clone(), notifier.clone());
    let outcome = check.run_at(at(2024, 6, 12, 9));

    assert!(!outcome.native_sent);
    assert_eq!(outcome.appended, 1);
    assert!(notifier.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timer_runs_initial_and_recurring_checks() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::unasked();
    add_reminder_task(&store, "Pay rent", local_date_today(), TaskStatus::Pending);

    let config = SchedulerConfig::new()
        .with_initial_delay(Duration::from_secs(3))
        .with_interval(Duration::from_secs(3600));
    let mut scheduler = ReminderScheduler::new(store, log.clone(), notifier.clone(), config);

    scheduler.start().unwrap();
    assert_eq!(notifier.permission_requests(), 1);

    // Nothing before the initial delay elapses
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(log.snapshot().is_empty());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(log.snapshot().len(), 1);
    assert_eq!(notifier.shown().len(), 1);

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(log.snapshot().len(), 1);
    assert_eq!(notifier.shown().len(), 2);

    scheduler.shutdown().await.unwrap();
    assert!(!scheduler.is_started());

    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(notifier.shown().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_initial_check_cancels_it() {
    let store = empty_task_store();
    let log = new_log();
    let notifier = RecordingNotifier::granted();
    add_reminder_task(&store, "Pay rent", local_date_today(), TaskStatus::Pending);

    let mut scheduler =
        ReminderScheduler::new(store, log.clone(), notifier.clone(), SchedulerConfig::new());
    scheduler.start().unwrap();
    assert_eq!(notifier.permission_requests(), 0);
    scheduler.shutdown().await.unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(log.snapshot().is_empty());
    assert!(notifier.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_start_twice_and_shutdown_twice() {
    let mut scheduler = ReminderScheduler::new(
        empty_task_store(),
        new_log(),
        RecordingNotifier::granted(),
        SchedulerConfig::new(),
    );

    assert!(matches!(
        scheduler.shutdown().await,
        Err(DashboardError::NotStarted)
    ));

    scheduler.start().unwrap();
    assert!(matches!(scheduler.start(), Err(DashboardError::AlreadyStarted)));

    scheduler.shutdown().await.unwrap();
    assert!(matches!(
        scheduler.shutdown().await,
        Err(DashboardError::NotStarted)
    ));

    // Restart after a clean shutdown
    scheduler.start().unwrap();
    scheduler.shutdown().await.unwrap();
}
