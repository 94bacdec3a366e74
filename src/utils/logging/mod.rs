//! Logging utilities
//!
//! Installs the process-wide `tracing` subscriber used by the binary and by
//! embedders that do not bring their own.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`; `RUST_LOG` takes precedence when set
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a fmt subscriber configured from `config`.
///
/// Returns `false` when a global subscriber was already installed, which
/// happens routinely in tests.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(false)
        .with_thread_ids(false);

    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
