//! Type definitions for metrics and alert severities

use crate::utils::error::{ObservabilityError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label set attached to a metric.
///
/// Ordered so that two label sets compare and hash by their full contents,
/// which is what identifies a series.
pub type Labels = BTreeMap<String, String>;

/// Build a label set from key/value pairs
pub fn labels<I, K, V>(pairs: I) -> Labels
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// Monotonically increasing count
    Counter,
    /// Point-in-time value
    Gauge,
    /// Distribution sample
    Histogram,
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricType::Counter => write!(f, "counter"),
            MetricType::Gauge => write!(f, "gauge"),
            MetricType::Histogram => write!(f, "histogram"),
        }
    }
}

/// A single named, labeled, timestamped observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name
    pub name: String,
    /// Metric kind
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// Observed value, always finite once accepted by the store
    pub value: f64,
    /// Series labels
    #[serde(default)]
    pub labels: Labels,
    /// Observation time
    pub timestamp: DateTime<Utc>,
}

impl Metric {
    /// Create a metric stamped with the current time
    pub fn new(name: impl Into<String>, metric_type: MetricType, value: f64) -> Self {
        Self {
            name: name.into(),
            metric_type,
            value,
            labels: Labels::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn counter(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricType::Counter, value)
    }

    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricType::Gauge, value)
    }

    pub fn histogram(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricType::Histogram, value)
    }

    /// Add a single label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Replace the label set
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Override the observation time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check the recording-boundary invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ObservabilityError::invalid_metric("metric name is empty"));
        }
        if !self.value.is_finite() {
            return Err(ObservabilityError::invalid_metric(format!(
                "metric '{}' has non-finite value {}",
                self.name, self.value
            )));
        }
        Ok(())
    }

    /// Whether every key in `filter` is present on this metric with the same value
    pub fn matches_labels(&self, filter: &Labels) -> bool {
        filter
            .iter()
            .all(|(k, v)| self.labels.get(k).is_some_and(|own| own == v))
    }
}

/// Alert severity levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Error => write!(f, "ERROR"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
