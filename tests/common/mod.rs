//! Common test utilities for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use omnitask::{EntityStore, MemoryStore, NewTask, Notifier, Permission, SharedLog, TaskStatus};

/// One call to [`Notifier::show`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub title: String,
    pub body: String,
    pub tag: String,
}

/// Notifier that records every native notification it is asked to show
pub struct RecordingNotifier {
    permission: Mutex<Permission>,
    on_request: Permission,
    requests: Mutex<usize>,
    shown: Mutex<Vec<Shown>>,
}

impl RecordingNotifier {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self::with_permission(Permission::Granted, Permission::Granted))
    }

    /// Starts unset; the user denies the prompt
    pub fn denied() -> Arc<Self> {
        Arc::new(Self::with_permission(Permission::Unset, Permission::Denied))
    }

    /// Starts unset; the user accepts the prompt
    pub fn unasked() -> Arc<Self> {
        Arc::new(Self::with_permission(Permission::Unset, Permission::Granted))
    }

    fn with_permission(current: Permission, on_request: Permission) -> Self {
        Self {
            permission: Mutex::new(current),
            on_request,
            requests: Mutex::new(0),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    pub fn permission_requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> Permission {
        *self.requests.lock().unwrap() += 1;
        *self.permission.lock().unwrap() = self.on_request;
        self.on_request
    }

    fn show(&self, title: &str, body: &str, tag: &str) {
        self.shown.lock().unwrap().push(Shown {
            title: title.to_string(),
            body: body.to_string(),
            tag: tag.to_string(),
        });
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Store with no seeded tasks (notes and meetings keep their seeds)
pub fn empty_task_store() -> Arc<EntityStore> {
    Arc::new(EntityStore::open(
        MemoryStore::new().with_entry("tasks", "items = []"),
    ))
}

/// Add a task with the reminder flag set
pub fn add_reminder_task(
    store: &EntityStore,
    title: &str,
    due: NaiveDate,
    status: TaskStatus,
) -> String {
    store
        .add_task(NewTask::new(title, due).with_status(status).with_reminder(true))
        .unwrap()
        .id
}

pub fn new_log() -> SharedLog {
    SharedLog::new()
}
