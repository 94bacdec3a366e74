//! Monitoring configuration validators
//!
//! This module provides validation implementations for the metric store,
//! alerting, health check and logging configuration structures.

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for MetricsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_samples_per_series == 0 {
            return Err("max_samples_per_series must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for AlertingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating alerting configuration");

        if self.history_limit == 0 {
            return Err("Alert history_limit must be greater than 0".to_string());
        }

        if self.dispatch_interval_ms == 0 {
            return Err("Alert dispatch_interval_ms must be greater than 0".to_string());
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(format!("Alert rule '{}' has an empty id", rule.name));
            }
            if rule.metric.trim().is_empty() {
                return Err(format!("Alert rule '{}' has an empty metric name", rule.id));
            }
            if !rule.threshold.is_finite() {
                return Err(format!("Alert rule '{}' has a non-finite threshold", rule.id));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(format!("Duplicate alert rule id: {}", rule.id));
            }
        }

        Ok(())
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.check_timeout_ms == 0 {
            return Err("Health check_timeout_ms must be greater than 0".to_string());
        }

        let in_range = |p: f64| p.is_finite() && p > 0.0 && p <= 100.0;
        if !in_range(self.memory_degraded_percent) || !in_range(self.memory_unhealthy_percent) {
            return Err("Memory thresholds must be percentages in (0, 100]".to_string());
        }

        if self.memory_unhealthy_percent <= self.memory_degraded_percent {
            return Err(
                "memory_unhealthy_percent must be greater than memory_degraded_percent".to_string(),
            );
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        Ok(())
    }
}
