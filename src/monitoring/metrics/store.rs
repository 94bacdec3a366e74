//! In-memory metric store keyed by name and label set

use super::bounded::BoundedPush;
use super::helpers::summarize_series;
use super::types::MetricsSnapshot;
use crate::config::MetricsConfig;
use crate::config::models::default_max_samples_per_series;
use crate::monitoring::types::{Labels, Metric};
use crate::utils::error::Result;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Callback invoked synchronously after every accepted sample
pub trait MetricObserver: Send + Sync {
    fn on_record(&self, metric: &Metric);
}

/// Series of one metric name, keyed by the full label set
type SeriesMap = HashMap<Labels, VecDeque<Metric>>;

/// Process-lifetime store of metric samples.
///
/// Each metric name lives in its own `DashMap` slot, so concurrent writers to
/// the same name serialize on that slot while writers to other names proceed
/// in parallel. Every series keeps at most `max_samples_per_series` samples and
/// evicts the oldest first.
pub struct MetricStore {
    series: DashMap<String, SeriesMap>,
    max_samples_per_series: usize,
    observers: RwLock<Vec<Arc<dyn MetricObserver>>>,
    total_recorded: AtomicU64,
    evicted: AtomicU64,
    rejected: AtomicU64,
}

impl std::fmt::Debug for MetricStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricStore")
            .field("names", &self.series.len())
            .field("max_samples_per_series", &self.max_samples_per_series)
            .field("observers", &self.observers.read().len())
            .finish()
    }
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new(default_max_samples_per_series())
    }
}

impl MetricStore {
    /// Create a store retaining at most `max_samples_per_series` samples per series
    pub fn new(max_samples_per_series: usize) -> Self {
        Self {
            series: DashMap::new(),
            max_samples_per_series: max_samples_per_series.max(1),
            observers: RwLock::new(Vec::new()),
            total_recorded: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.max_samples_per_series)
    }

    /// Register an observer notified after each accepted sample
    pub fn add_observer(&self, observer: Arc<dyn MetricObserver>) {
        self.observers.write().push(observer);
    }

    /// Per-series retention cap
    pub fn max_samples_per_series(&self) -> usize {
        self.max_samples_per_series
    }

    /// Append a sample to the series identified by `(name, labels)`.
    ///
    /// Non-finite values and empty names are rejected with
    /// `ObservabilityError::InvalidMetric`. Observers run after the series lock
    /// has been released.
    pub fn record(&self, mut metric: Metric) -> Result<()> {
        if let Err(e) = metric.validate() {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(e);
        }

        {
            let mut by_labels = self.series.entry(metric.name.clone()).or_default();
            let samples = by_labels.entry(metric.labels.clone()).or_default();

            // keep per-series timestamps non-decreasing
            if let Some(newest) = samples.back() {
                if metric.timestamp < newest.timestamp {
                    metric.timestamp = newest.timestamp;
                }
            }

            if samples
                .push_bounded(metric.clone(), self.max_samples_per_series)
                .is_some()
            {
                self.evicted.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.total_recorded.fetch_add(1, Ordering::Relaxed);
        debug!(name = %metric.name, value = metric.value, "Recorded metric");

        for observer in self.observers.read().iter() {
            observer.on_record(&metric);
        }

        Ok(())
    }

    /// Record without surfacing the error; rejected samples are logged and dropped
    pub fn record_or_log(&self, metric: Metric) {
        if let Err(e) = self.record(metric) {
            warn!("Dropping metric: {}", e);
        }
    }

    /// All samples named `name` whose labels contain every `label_filter` pair
    pub fn query(&self, name: &str, label_filter: &Labels) -> Vec<Metric> {
        let Some(by_labels) = self.series.get(name) else {
            return Vec::new();
        };

        by_labels
            .iter()
            .filter(|(labels, _)| {
                label_filter
                    .iter()
                    .all(|(k, v)| labels.get(k).is_some_and(|own| own == v))
            })
            .flat_map(|(_, samples)| samples.iter().cloned())
            .collect()
    }

    /// Newest sample of the exact series `(name, labels)`
    pub fn latest(&self, name: &str, labels: &Labels) -> Option<Metric> {
        self.series
            .get(name)
            .and_then(|by_labels| by_labels.get(labels).and_then(|s| s.back().cloned()))
    }

    /// Names with at least one series, sorted
    pub fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.series.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of distinct `(name, labels)` series
    pub fn series_count(&self) -> usize {
        self.series.iter().map(|e| e.value().len()).sum()
    }

    /// Number of retained samples across all series
    pub fn sample_count(&self) -> usize {
        self.series
            .iter()
            .map(|e| e.value().values().map(VecDeque::len).sum::<usize>())
            .sum()
    }

    /// Drop every series named `name`, returning how many samples were removed
    pub fn remove(&self, name: &str) -> usize {
        self.series
            .remove(name)
            .map(|(_, by_labels)| by_labels.values().map(VecDeque::len).sum())
            .unwrap_or(0)
    }

    /// Drop all samples
    pub fn clear(&self) {
        self.series.clear();
    }

    /// Summarise every series
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut series = Vec::new();
        let mut total_samples = 0;

        for entry in self.series.iter() {
            for (labels, samples) in entry.value() {
                total_samples += samples.len();
                if let Some(summary) = summarize_series(entry.key(), labels, samples) {
                    series.push(summary);
                }
            }
        }

        series.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.labels.cmp(&b.labels)));

        MetricsSnapshot {
            total_series: series.len(),
            total_samples,
            series,
            total_recorded: self.total_recorded.load(Ordering::Relaxed),
            evicted_samples: self.evicted.load(Ordering::Relaxed),
            rejected_samples: self.rejected.load(Ordering::Relaxed),
        }
    }
}
