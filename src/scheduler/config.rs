//! Reminder scheduler configuration.

use std::time::Duration;

/// Timing for the reminder scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Delay before the first check, giving the store time to finish loading.
    pub initial_delay: Duration,
    /// Period of the recurring check, measured from start.
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            interval: Duration::from_secs(60 * 60),
        }
    }
}

impl SchedulerConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the recurring interval. A zero interval is raised to 1ms.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }
}
