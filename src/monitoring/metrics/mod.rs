//! Metric storage and collection
//!
//! `MetricStore` owns every recorded sample; `MetricsCollector` is the
//! domain-facing facade that builds canonical metrics and feeds the store.

mod bounded;
mod collector;
mod helpers;
mod store;
mod types;


pub use collector::{
    AUTH_EVENTS_TOTAL, ERRORS_TOTAL, HTTP_REQUEST_DURATION_MS, HTTP_REQUESTS_TOTAL,
    MetricsCollector, RATE_LIMIT_CHECKS_TOTAL,
};
pub use store::{MetricObserver, MetricStore};
pub use types::{MetricsSnapshot, SeriesSummary};
