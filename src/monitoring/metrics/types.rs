//! Snapshot types exposed by the metric store

use crate::monitoring::types::{Labels, MetricType};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate view of one series at snapshot time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub labels: Labels,
    /// Retained samples
    pub count: usize,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub last_updated: DateTime<Utc>,
}

/// Point-in-time copy of the whole store
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// One entry per live series, sorted by name then labels
    pub series: Vec<SeriesSummary>,
    pub total_series: usize,
    pub total_samples: usize,
    /// Samples accepted since the store was created
    pub total_recorded: u64,
    /// Samples dropped by per-series retention
    pub evicted_samples: u64,
    /// Samples refused at the recording boundary
    pub rejected_samples: u64,
}

impl MetricsSnapshot {
    /// Whether the snapshot holds no series
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
