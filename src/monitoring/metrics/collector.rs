//! Domain-event facade over the metric store
//!
//! These helpers are the sanctioned way request-handling code feeds the store,
//! so metric names and label conventions live in one place.

use super::store::MetricStore;
use crate::monitoring::types::Metric;
use std::sync::Arc;
use tracing::{debug, warn};

/// Counter of handled HTTP requests, labeled `{method, path, status}`
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Request latency samples in milliseconds, labeled `{method, path, status}`
pub const HTTP_REQUEST_DURATION_MS: &str = "http_request_duration_ms";
/// Counter of authentication attempts, labeled `{action, success, method}`
pub const AUTH_EVENTS_TOTAL: &str = "auth_events_total";
/// Counter of rate limiter decisions, labeled `{endpoint, allowed}`
pub const RATE_LIMIT_CHECKS_TOTAL: &str = "rate_limit_checks_total";
/// Counter of application errors, labeled `{type, endpoint}`
pub const ERRORS_TOTAL: &str = "errors_total";

/// Metrics collector translating domain events into canonical metrics.
///
/// Every method is fire-and-forget: a sample the store refuses is logged and
/// dropped, never returned to the instrumented request.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    store: Arc<MetricStore>,
}

impl MetricsCollector {
    /// Create a collector writing into `store`
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<MetricStore> {
        &self.store
    }

    /// Record a handled HTTP request
    pub fn record_http_request(
        &self,
        method: &str,
        path: &str,
        status_code: u16,
        duration_ms: f64,
        user_id: Option<&str>,
    ) {
        let status = status_code.to_string();

        self.emit(
            Metric::counter(HTTP_REQUESTS_TOTAL, 1.0)
                .with_label("method", method)
                .with_label("path", path)
                .with_label("status", status.as_str()),
        );
        self.emit(
            Metric::histogram(HTTP_REQUEST_DURATION_MS, duration_ms)
                .with_label("method", method)
                .with_label("path", path)
                .with_label("status", status),
        );

        if let Some(user_id) = user_id {
            debug!(user_id, method, path, status_code, "HTTP request recorded");
        }
    }

    /// Record an authentication attempt
    pub fn record_auth_event(
        &self,
        action: &str,
        success: bool,
        method: &str,
        user_id: Option<&str>,
    ) {
        self.emit(
            Metric::counter(AUTH_EVENTS_TOTAL, 1.0)
                .with_label("action", action)
                .with_label("success", success.to_string())
                .with_label("method", method),
        );

        if !success {
            debug!(action, method, user_id = user_id.unwrap_or("-"), "Failed auth event");
        }
    }

    /// Record a rate limiter decision.
    ///
    /// `identifier` (client key or IP) is unbounded and stays out of the labels.
    pub fn record_rate_limit(&self, identifier: &str, endpoint: &str, allowed: bool) {
        self.emit(
            Metric::counter(RATE_LIMIT_CHECKS_TOTAL, 1.0)
                .with_label("endpoint", endpoint)
                .with_label("allowed", allowed.to_string()),
        );

        if !allowed {
            debug!(identifier, endpoint, "Rate limit rejected request");
        }
    }

    /// Record an application error
    pub fn record_error(&self, error_type: &str, endpoint: &str) {
        self.emit(
            Metric::counter(ERRORS_TOTAL, 1.0)
                .with_label("type", error_type)
                .with_label("endpoint", endpoint),
        );
    }

    fn emit(&self, metric: Metric) {
        let name = metric.name.clone();
        if let Err(e) = self.store.record(metric) {
            warn!(metric = %name, "Collector dropped metric: {}", e);
        }
    }
}
