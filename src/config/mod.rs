//! Configuration management for the observability core
//!
//! This module handles loading, validation, and merging of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ObservabilityError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "OBSERVABILITY_";

/// Main configuration struct for the observability core
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Metric store configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Alerting configuration
    #[serde(default)]
    pub alerting: AlertingConfig,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ObservabilityConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ObservabilityError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ObservabilityError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `OBSERVABILITY_*` environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults overridden by `lookup`
    ///
    /// `lookup` receives the full variable name (e.g. `OBSERVABILITY_LOG_LEVEL`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Load the YAML file at `path`, if any, then apply `OBSERVABILITY_*`
    /// overrides and validate the result
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply every variable `lookup` knows about on top of `self`.
    ///
    /// A variable that is set always wins, even when it equals the default.
    /// The combined configuration is validated before it is returned.
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;

        if let Some(v) = parse_var(&lookup, "MAX_SAMPLES_PER_SERIES")? {
            config.metrics.max_samples_per_series = v;
        }
        if let Some(v) = parse_var(&lookup, "ALERT_COOLDOWN_SECS")? {
            config.alerting.cooldown_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "ALERT_HISTORY_LIMIT")? {
            config.alerting.history_limit = v;
        }
        if let Some(v) = parse_var(&lookup, "ALERT_DISPATCH_INTERVAL_MS")? {
            config.alerting.dispatch_interval_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "CHECK_TIMEOUT_MS")? {
            config.health.check_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "MEMORY_DEGRADED_PERCENT")? {
            config.health.memory_degraded_percent = v;
        }
        if let Some(v) = parse_var(&lookup, "MEMORY_UNHEALTHY_PERCENT")? {
            config.health.memory_unhealthy_percent = v;
        }
        if let Some(level) = lookup(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
            config.logging.level = level;
        }
        if let Some(v) = parse_var(&lookup, "LOG_JSON")? {
            config.logging.json = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.metrics
            .validate()
            .map_err(|e| ObservabilityError::Config(format!("Metrics config error: {}", e)))?;
        self.alerting
            .validate()
            .map_err(|e| ObservabilityError::Config(format!("Alerting config error: {}", e)))?;
        self.health
            .validate()
            .map_err(|e| ObservabilityError::Config(format!("Health config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| ObservabilityError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.metrics = self.metrics.merge(other.metrics);
        self.alerting = self.alerting.merge(other.alerting);
        self.health = self.health.merge(other.health);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn parse_var<F, T>(lookup: &F, suffix: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{}{}", ENV_PREFIX, suffix);
    match lookup(&key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ObservabilityError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
