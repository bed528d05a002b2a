//! OmniTask Dashboard Library
//!
//! Core of a personal productivity dashboard: tasks, notes and meetings kept
//! in a key-value backend, a background reminder scheduler feeding an in-app
//! notification log (plus an optional native channel), and period reports
//! with CSV / Word export.
//!
//! # Architecture
//!
//! - **Facade**: [`Dashboard`] - the surface a UI or the CLI talks to
//! - **Domain**: `model`, `report`, `views` - pure data and projections
//! - **Services**: `store`, `scheduler`, `notifications` - shared state and the timer task
//! - **Persistence**: `storage` - TOML documents per collection key
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use omnitask::{AppConfig, Dashboard, FileStore, TracingNotifier};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::default();
//!     let backend = FileStore::new(&config.data_dir);
//!     let mut dashboard = Dashboard::open(&config, backend, Arc::new(TracingNotifier));
//!     dashboard.start_reminders()?;
//!     // ...
//!     dashboard.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod model;
pub mod notifications;
pub mod notifier;
pub mod report;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod validation;
pub mod views;

use std::sync::Arc;

use tracing::info;

// Re-export commonly used types
pub use config::{AppConfig, RemindersConfig};
pub use error::{DashboardError, Result};
pub use model::{AppNotification, Meeting, NewMeeting, NewTask, Note, Task, TaskStatus};
pub use notifications::{NotificationLog, SharedLog};
pub use notifier::{Notifier, Permission, TracingNotifier, Unavailable};
pub use report::{ExportFormat, Report, ReportPeriod, generate_report};
pub use scheduler::{ReminderScheduler, SchedulerConfig, TickOutcome};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{EntityStore, NoteUpdate, StoreEvent};

/// Application state shared by every view
///
/// Owns the entity store, the notification log and the reminder scheduler.
/// The scheduler is not running until [`Dashboard::start_reminders`] is called.
pub struct Dashboard {
    store: Arc<EntityStore>,
    log: SharedLog,
    scheduler: ReminderScheduler,
}

impl Dashboard {
    /// Open the dashboard over `backend`
    ///
    /// # Arguments
    /// * `config` - Application configuration; only the reminder timing is used here
    /// * `backend` - Key-value persistence for the three collections
    /// * `notifier` - Native notification channel
    pub fn open(
        config: &AppConfig,
        backend: impl KeyValueStore + 'static,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = Arc::new(EntityStore::open(backend));
        let log = SharedLog::new();
        let scheduler = ReminderScheduler::new(
            Arc::clone(&store),
            log.clone(),
            notifier,
            config.scheduler_config(),
        );
        Self {
            store,
            log,
            scheduler,
        }
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    /// Notification log snapshot, newest first
    pub fn notifications(&self) -> Vec<AppNotification> {
        self.log.snapshot()
    }

    pub fn unread_count(&self) -> usize {
        self.log.unread_count()
    }

    pub fn mark_all_read(&self) {
        self.log.mark_all_read();
    }

    /// Report over the current tasks
    ///
    /// # Arguments
    /// * `period` - Report period
    /// * `reference` - Reference date in YYYY-MM-DD format
    pub fn report(&self, period: ReportPeriod, reference: &str) -> Result<Report> {
        generate_report(&self.store.tasks(), period, reference)
    }

    /// Start the background reminder scheduler
    pub fn start_reminders(&mut self) -> Result<()> {
        self.scheduler.start()
    }

    /// Run one reminder check immediately
    pub fn check_reminders(&self) -> TickOutcome {
        self.scheduler.check_now()
    }

    /// Stop the scheduler if it is running
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.scheduler.is_started() {
            self.scheduler.shutdown().await?;
        }
        info!("dashboard closed");
        Ok(())
    }
}
