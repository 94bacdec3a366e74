//! Monitoring configuration

use super::*;
use crate::monitoring::alerts::AlertRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metric store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Samples retained per series before the oldest is evicted
    #[serde(default = "default_max_samples_per_series")]
    pub max_samples_per_series: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_samples_per_series: default_max_samples_per_series(),
        }
    }
}

impl MetricsConfig {
    /// Merge metrics configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_samples_per_series != default_max_samples_per_series() {
            self.max_samples_per_series = other.max_samples_per_series;
        }
        self
    }
}

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Minimum seconds between two firings of the same rule
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Number of fired alert events kept for the dashboard
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Interval of the background notifier dispatch loop
    #[serde(default = "default_dispatch_interval_ms")]
    pub dispatch_interval_ms: u64,
    /// Rules installed when the engine is built
    #[serde(default)]
    pub rules: Vec<AlertRule>,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            history_limit: default_history_limit(),
            dispatch_interval_ms: default_dispatch_interval_ms(),
            rules: Vec::new(),
        }
    }
}

impl AlertingConfig {
    /// Default cooldown as a `Duration`
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Dispatch loop interval as a `Duration`, never shorter than 1ms
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms.max(1))
    }

    /// Merge alerting configurations; rules from `other` replace rules with the same id
    pub fn merge(mut self, other: Self) -> Self {
        if other.cooldown_secs != default_cooldown_secs() {
            self.cooldown_secs = other.cooldown_secs;
        }
        if other.history_limit != default_history_limit() {
            self.history_limit = other.history_limit;
        }
        if other.dispatch_interval_ms != default_dispatch_interval_ms() {
            self.dispatch_interval_ms = other.dispatch_interval_ms;
        }
        for rule in other.rules {
            self.rules.retain(|existing| existing.id != rule.id);
            self.rules.push(rule);
        }
        self
    }
}

/// Health check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Per-check timeout in milliseconds
    #[serde(default = "default_check_timeout_ms")]
    pub check_timeout_ms: u64,
    /// System memory usage (percent) at which the memory check reports Degraded
    #[serde(default = "default_memory_degraded_percent")]
    pub memory_degraded_percent: f64,
    /// System memory usage (percent) at which the memory check reports Unhealthy
    #[serde(default = "default_memory_unhealthy_percent")]
    pub memory_unhealthy_percent: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            check_timeout_ms: default_check_timeout_ms(),
            memory_degraded_percent: default_memory_degraded_percent(),
            memory_unhealthy_percent: default_memory_unhealthy_percent(),
        }
    }
}

impl HealthConfig {
    /// Per-check timeout as a `Duration`
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Merge health configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.check_timeout_ms != default_check_timeout_ms() {
            self.check_timeout_ms = other.check_timeout_ms;
        }
        if other.memory_degraded_percent != default_memory_degraded_percent() {
            self.memory_degraded_percent = other.memory_degraded_percent;
        }
        if other.memory_unhealthy_percent != default_memory_unhealthy_percent() {
            self.memory_unhealthy_percent = other.memory_unhealthy_percent;
        }
        self
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Merge logging configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.level != default_log_level() {
            self.level = other.level;
        }
        if other.json {
            self.json = true;
        }
        self
    }
}
