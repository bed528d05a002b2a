//! TOML-based application configuration.
//!
//! ```toml
//! data_dir = ".omnitask"
//! log_level = "info"
//!
//! [reminders]
//! enabled = true
//! initial_delay_secs = 3
//! interval_secs = 3600
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::scheduler::SchedulerConfig;

/// Reminder scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub reminders: RemindersConfig,
}

fn default_true() -> bool {
    true
}
fn default_initial_delay_secs() -> u64 {
    3
}
fn default_interval_secs() -> u64 {
    60 * 60
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".omnitask")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            initial_delay_secs: default_initial_delay_secs(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            reminders: RemindersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|message| DashboardError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Scheduler timing derived from `[reminders]`.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::new()
            .with_initial_delay(Duration::from_secs(self.reminders.initial_delay_secs))
            .with_interval(Duration::from_secs(self.reminders.interval_secs))
    }
}
