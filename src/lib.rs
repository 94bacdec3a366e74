//! # blipee-observability
//!
//! In-process observability core: a metric store keyed by name and label
//! set, threshold alert rules evaluated on every write, concurrent health
//! checks with per-check isolation, and a dashboard facade over all three.
//!
//! ## Features
//!
//! - **Metric store**: bounded per-series retention with FIFO eviction
//! - **Collector**: canonical HTTP, auth, rate-limit and error metrics
//! - **Alerting**: `gt`/`gte`/`lt`/`lte`/`eq` rules with per-rule cooldown
//! - **Health checks**: async checks with timeouts and panic isolation
//! - **Dashboard**: one read view that renders even when a section fails
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blipee_observability::{
//!     AlertChannel, AlertRule, CheckOutcome, ComparisonOperator, LogNotifier,
//!     MonitoringSystem, ObservabilityConfig,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = MonitoringSystem::new(
//!         ObservabilityConfig::default(),
//!         Arc::new(LogNotifier::default()),
//!     );
//!
//!     system.alerts().set_rule(
//!         AlertRule::new(
//!             "slow-requests",
//!             "Slow requests",
//!             "http_request_duration_ms",
//!             ComparisonOperator::GreaterThan,
//!             2000.0,
//!         )
//!         .with_channel(AlertChannel::Slack),
//!     )?;
//!
//!     // built inside a runtime, so the alert dispatch loop is already running
//!     system.health().register("database", || async { Ok(CheckOutcome::healthy()) });
//!
//!     system
//!         .collector()
//!         .record_http_request("GET", "/api/emissions", 200, 2500.0, None);
//!
//!     let dashboard = system.get_dashboard().await;
//!     println!("{}", serde_json::to_string_pretty(&dashboard)?);
//!
//!     system.stop().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use config::ObservabilityConfig;
pub use monitoring::alerts::{
    AlertChannel, AlertEvent, AlertRule, AlertRuleEngine, AlertStats, ComparisonOperator,
    LogNotifier, NoopNotifier, Notifier,
};
pub use monitoring::health::{
    CheckOutcome, HealthCheckRegistry, HealthCheckResult, HealthStatus, SystemHealthSummary,
};
pub use monitoring::metrics::{MetricObserver, MetricStore, MetricsCollector, MetricsSnapshot};
pub use monitoring::{AlertSeverity, Dashboard, Labels, Metric, MetricType, MonitoringSystem};
pub use utils::error::{ObservabilityError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
