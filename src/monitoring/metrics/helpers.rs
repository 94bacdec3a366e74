//! Helper functions for series summaries

use super::types::SeriesSummary;
use crate::monitoring::types::{Labels, Metric};
use std::collections::VecDeque;

/// Calculate percentile from sorted values
pub(super) fn calculate_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    if percentile >= 1.0 {
        return sorted_values.last().copied().unwrap_or(0.0);
    }

    let index = percentile * (sorted_values.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (index.ceil() as usize).min(sorted_values.len() - 1);

    if lower == upper || lower >= sorted_values.len() {
        sorted_values.get(lower).copied().unwrap_or(0.0)
    } else {
        let weight = index - lower as f64;
        let lower_val = sorted_values.get(lower).copied().unwrap_or(0.0);
        let upper_val = sorted_values.get(upper).copied().unwrap_or(0.0);
        lower_val * (1.0 - weight) + upper_val * weight
    }
}

/// Summarise one series. Returns `None` for an empty series.
pub(super) fn summarize_series(
    name: &str,
    labels: &Labels,
    samples: &VecDeque<Metric>,
) -> Option<SeriesSummary> {
    let latest = samples.back()?;

    let mut sorted: Vec<f64> = samples.iter().map(|m| m.value).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let sum: f64 = sorted.iter().sum();
    let count = sorted.len();

    Some(SeriesSummary {
        name: name.to_string(),
        metric_type: latest.metric_type,
        labels: labels.clone(),
        count,
        last: latest.value,
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        sum,
        avg: sum / count as f64,
        p50: calculate_percentile(&sorted, 0.50),
        p95: calculate_percentile(&sorted, 0.95),
        p99: calculate_percentile(&sorted, 0.99),
        last_updated: latest.timestamp,
    })
}
