//! Reminder scheduler
//!
//! Polls the entity store for tasks due today: once after a short initial
//! delay, then on a fixed interval measured from start. Detection is
//! best-effort; a task is caught by whichever tick runs on its due date.
//!
//! Ticks run inside one tokio task, so they never overlap. The notification
//! log lock additionally covers each tick's dedup check and append.

mod check;
mod config;

pub use check::{
    NATIVE_TAG, NATIVE_TITLE, ReminderCheck, TickOutcome, already_notified, due_today,
    native_body, new_reminders, reminder_message, reminder_title,
};
pub use config::SchedulerConfig;

use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::notifications::SharedLog;
use crate::notifier::{Notifier, Permission};
use crate::store::EntityStore;

/// Owns the timer task that drives [`ReminderCheck`].
pub struct ReminderScheduler {
    check: ReminderCheck,
    config: SchedulerConfig,
    /// Handle to the timer task.
    handle: Option<JoinHandle<()>>,
    /// Shutdown signal sender; replaced on every start.
    shutdown_tx: watch::Sender<bool>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<EntityStore>,
        log: SharedLog,
        notifier: Arc<dyn Notifier>,
        config: SchedulerConfig,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            check: ReminderCheck::new(store, log, notifier),
            config,
            handle: None,
            shutdown_tx,
        }
    }

    /// Ask for native permission if needed and spawn the timer task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Err(DashboardError::AlreadyStarted);
        }

        let notifier = self.check.notifier();
        if notifier.permission() != Permission::Granted {
            let permission = notifier.request_permission();
            debug!(?permission, "requested native notification permission");
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.shutdown_tx = shutdown_tx;

        let check = self.check.clone();
        let config = self.config.clone();
        self.handle = Some(tokio::spawn(run(check, config, shutdown_rx)));

        info!(
            initial_delay_ms = self.config.initial_delay.as_millis(),
            interval_secs = self.config.interval.as_secs(),
            "reminder scheduler started"
        );
        Ok(())
    }

    /// Cancel both the pending initial check and the recurring one, then wait
    /// for the timer task to exit.
    pub async fn shutdown(&mut self) -> Result<()> {
        let handle = self.handle.take().ok_or(DashboardError::NotStarted)?;

        // The task may already be gone; joining below reports that case
        let _ = self.shutdown_tx.send(true);
        handle
            .await
            .map_err(|e| DashboardError::Shutdown(format!("scheduler task failed: {}", e)))?;

        info!("reminder scheduler stopped");
        Ok(())
    }

    /// Run a tick right now, outside the timer.
    pub fn check_now(&self) -> TickOutcome {
        self.check.run_at(Local::now())
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.shutdown_tx.send(true);
        }
    }
}

async fn run(check: ReminderCheck, config: SchedulerConfig, mut shutdown: watch::Receiver<bool>) {
    let initial = sleep(config.initial_delay);
    tokio::pin!(initial);
    let mut initial_pending = true;

    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut initial, if initial_pending => {
                initial_pending = false;
                check.run_at(Local::now());
            }
            _ = ticker.tick() => {
                check.run_at(Local::now());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("scheduler received shutdown signal");
                    break;
                }
            }
        }
    }
}
