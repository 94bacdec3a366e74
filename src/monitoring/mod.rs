//! Monitoring and observability system
//!
//! In-process metric store, threshold alerting, health checks and the
//! dashboard facade that composes them.

// Public submodules
pub mod alerts;
pub mod health;
pub mod metrics;

// Internal submodules
mod background;
mod system;
mod types;

// Re-export public types
pub use system::{DASHBOARD_RECENT_EVENTS, Dashboard, MonitoringSystem};
pub use types::{AlertSeverity, Labels, Metric, MetricType, labels};
