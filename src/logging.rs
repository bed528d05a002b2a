//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global fmt subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing one
/// is kept.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
