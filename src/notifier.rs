//! Native (OS-level) notification channel
//!
//! The scheduler talks to the host platform only through [`Notifier`]. A
//! notifier that is unavailable or denied simply means reminders go to the
//! in-app log alone.

use tracing::info;

/// Permission state for native notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked, or the platform has no notification API
    Unset,
}

/// Host notification API
pub trait Notifier: Send + Sync {
    /// Current permission, without prompting
    fn permission(&self) -> Permission;

    /// Ask the user for permission and return the outcome
    fn request_permission(&self) -> Permission;

    /// Show a notification. `tag` is stable across repeats so the host may
    /// collapse duplicates.
    fn show(&self, title: &str, body: &str, tag: &str);
}

/// No notification API on this host
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl Notifier for Unavailable {
    fn permission(&self) -> Permission {
        Permission::Unset
    }

    fn request_permission(&self) -> Permission {
        Permission::Unset
    }

    fn show(&self, _title: &str, _body: &str, _tag: &str) {}
}

/// Emits notifications as `tracing` events; always granted
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, title: &str, body: &str, tag: &str) {
        info!(title, body, tag, "native notification");
    }
}
