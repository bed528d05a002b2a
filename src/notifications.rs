//! In-app notification log
//!
//! Newest entries first. The reminder scheduler appends, the UI marks entries
//! read. Nothing is ever removed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::AppNotification;

/// Ordered record of every notification raised
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Vec<AppNotification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `batch`, keeping its internal order, ahead of older entries.
    ///
    /// No deduplication happens here.
    pub fn append(&mut self, batch: Vec<AppNotification>) {
        if batch.is_empty() {
            return;
        }
        self.entries.splice(0..0, batch);
    }

    /// Mark every entry read; calling it again changes nothing
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.mark_read();
        }
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read()).count()
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[AppNotification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Notification log shared between the scheduler task and the UI boundary.
///
/// Holding the guard across a read-then-append keeps the reminder dedup check
/// and the insert atomic.
#[derive(Debug, Default, Clone)]
pub struct SharedLog {
    inner: Arc<Mutex<NotificationLog>>,
}

impl SharedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, NotificationLog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all entries, newest first
    pub fn snapshot(&self) -> Vec<AppNotification> {
        self.lock().entries().to_vec()
    }

    pub fn mark_all_read(&self) {
        self.lock().mark_all_read();
    }

    pub fn unread_count(&self) -> usize {
        self.lock().unread_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn notification(title: &str) -> AppNotification {
        AppNotification::new(title, "message", Local::now())
    }

    #[test]
    fn test_append_prepends_batch_in_order() {
        let mut log = NotificationLog::new();
        log.append(vec![notification("old")]);
        log.append(vec![notification("new-1"), notification("new-2")]);

        let titles: Vec<&str> = log.entries().iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["new-1", "new-2", "old"]);
    }

    #[test]
    fn test_append_does_not_dedup() {
        let mut log = NotificationLog::new();
        log.append(vec![notification("same")]);
        log.append(vec![notification("same")]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_mark_all_read_is_idempotent() {
        let mut log = NotificationLog::new();
        log.append(vec![notification("a"), notification("b")]);
        assert_eq!(log.unread_count(), 2);

        log.mark_all_read();
        assert_eq!(log.unread_count(), 0);
        log.mark_all_read();
        assert_eq!(log.unread_count(), 0);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_shared_log_clones_see_same_entries() {
        let log = SharedLog::new();
        let other = log.clone();
        log.lock().append(vec![notification("a")]);
        assert_eq!(other.unread_count(), 1);
        other.mark_all_read();
        assert_eq!(log.unread_count(), 0);
    }
}
