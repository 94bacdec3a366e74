//! Configuration data models
//!
//! This module defines all configuration structures used by the observability core.

pub mod monitoring;

// Re-export all configuration types
pub use monitoring::*;

/// Default per-series sample cap
pub fn default_max_samples_per_series() -> usize {
    1000
}

/// Default alert cooldown (5 minutes)
pub fn default_cooldown_secs() -> u64 {
    300
}

/// Default number of fired alert events retained
pub fn default_history_limit() -> usize {
    100
}

/// Default notifier dispatch interval in milliseconds
pub fn default_dispatch_interval_ms() -> u64 {
    1000
}

/// Default health check timeout in milliseconds
pub fn default_check_timeout_ms() -> u64 {
    5000
}

/// Default memory usage percentage considered degraded
pub fn default_memory_degraded_percent() -> f64 {
    85.0
}

/// Default memory usage percentage considered unhealthy
pub fn default_memory_unhealthy_percent() -> f64 {
    95.0
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
