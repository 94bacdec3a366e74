//! Core MonitoringSystem implementation

use crate::config::ObservabilityConfig;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{info, warn};

use super::alerts::{AlertEvent, AlertRule, AlertRuleEngine, AlertStats, Notifier};
use super::background::DispatchTask;
use super::health::{HealthCheckRegistry, HealthCheckResult, SystemHealthSummary, panic_reason};
use super::metrics::{MetricStore, MetricsCollector, MetricsSnapshot};
use super::types::Metric;

/// Number of fired alert events shown on the dashboard
pub const DASHBOARD_RECENT_EVENTS: usize = 20;

/// Read view assembled by [`MonitoringSystem::get_dashboard`].
///
/// Every section is always present; a section that could not be built is
/// empty and named in `degraded_sections`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: MetricsSnapshot,
    pub alerts: Vec<AlertRule>,
    pub health_checks: Vec<HealthCheckResult>,
    pub recent_events: Vec<AlertEvent>,
    pub alert_stats: AlertStats,
    pub generated_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub degraded_sections: Vec<String>,
}

impl Dashboard {
    /// Whether any section was replaced by a placeholder
    pub fn is_degraded(&self) -> bool {
        !self.degraded_sections.is_empty()
    }
}

/// Main monitoring system.
///
/// An explicitly constructed service owning the store, the rule engine and
/// the health registry. Clones share the same state.
#[derive(Debug, Clone)]
pub struct MonitoringSystem {
    pub(super) config: Arc<ObservabilityConfig>,
    pub(super) store: Arc<MetricStore>,
    pub(super) collector: MetricsCollector,
    pub(super) alerts: AlertRuleEngine,
    pub(super) health: HealthCheckRegistry,
    /// Background notifier dispatch loop, if started
    pub(super) dispatch: Arc<Mutex<Option<DispatchTask>>>,
    pub(super) start_time: Instant,
}

impl MonitoringSystem {
    /// Build every component from configuration.
    ///
    /// Inside a tokio runtime the alert dispatch loop starts right away.
    /// Outside one, call [`MonitoringSystem::start`] from async code before
    /// expecting fired alerts to reach the notifier.
    pub fn new(config: ObservabilityConfig, notifier: Arc<dyn Notifier>) -> Self {
        let store = Arc::new(MetricStore::from_config(&config.metrics));
        let alerts = AlertRuleEngine::new(&config.alerting, notifier);
        let health = HealthCheckRegistry::new(&config.health);

        Self::with_components(config, store, alerts, health)
    }

    /// Assemble a system from existing components.
    ///
    /// Starts the dispatch loop the same way [`MonitoringSystem::new`] does.
    /// The engine is registered as an observer of the store, so pass a store
    /// that is not already wired to the same engine.
    pub fn with_components(
        config: ObservabilityConfig,
        store: Arc<MetricStore>,
        alerts: AlertRuleEngine,
        health: HealthCheckRegistry,
    ) -> Self {
        store.add_observer(Arc::new(alerts.clone()));
        let collector = MetricsCollector::new(store.clone());

        info!(
            rules = alerts.rule_count(),
            checks = health.len(),
            "Monitoring system initialized"
        );

        let system = Self {
            config: Arc::new(config),
            store,
            collector,
            alerts,
            health,
            dispatch: Arc::new(Mutex::new(None)),
            start_time: Instant::now(),
        };

        match Handle::try_current() {
            Ok(runtime) => system.spawn_dispatch(&runtime),
            Err(_) => warn!("No tokio runtime; fired alerts stay queued until start() is called"),
        }

        system
    }

    pub fn config(&self) -> &ObservabilityConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<MetricStore> {
        &self.store
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }

    pub fn alerts(&self) -> &AlertRuleEngine {
        &self.alerts
    }

    pub fn health(&self) -> &HealthCheckRegistry {
        &self.health
    }

    /// Record a custom metric; rules bound to its name are evaluated in-line
    pub fn record(&self, metric: Metric) -> Result<()> {
        self.store.record(metric)
    }

    /// Get system uptime
    pub fn get_uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Run every health check and summarise
    pub async fn get_system_health(&self) -> SystemHealthSummary {
        self.health.get_system_health().await
    }

    /// Assemble the dashboard.
    ///
    /// Read-only. Health checks run on their own task while the in-memory
    /// sections are copied; a failure in one section leaves the others intact.
    pub async fn get_dashboard(&self) -> Dashboard {
        let mut degraded = Vec::new();

        let health = self.health.clone();
        let health_task = tokio::spawn(async move { health.run_all().await });

        let metrics = section("metrics", &mut degraded, || self.store.snapshot());
        let alerts = section("alerts", &mut degraded, || self.alerts.list_rules());
        let recent_events = section("recentEvents", &mut degraded, || {
            self.alerts.recent_events(DASHBOARD_RECENT_EVENTS)
        });
        let alert_stats = section("alertStats", &mut degraded, || self.alerts.stats());

        let health_checks = match health_task.await {
            Ok(results) => results,
            Err(e) => {
                let reason = if e.is_panic() {
                    panic_reason(e.into_panic().as_ref())
                } else {
                    e.to_string()
                };
                warn!("Dashboard section healthChecks unavailable: {}", reason);
                degraded.push("healthChecks".to_string());
                Vec::new()
            }
        };

        Dashboard {
            metrics,
            alerts,
            health_checks,
            recent_events,
            alert_stats,
            generated_at: Utc::now(),
            uptime_seconds: self.get_uptime().as_secs(),
            degraded_sections: degraded,
        }
    }
}

/// Build one in-memory dashboard section, substituting the empty value on panic
fn section<T: Default>(name: &str, degraded: &mut Vec<String>, build: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(build)) {
        Ok(value) => value,
        Err(payload) => {
            warn!(
                "Dashboard section {} unavailable: {}",
                name,
                panic_reason(payload.as_ref())
            );
            degraded.push(name.to_string());
            T::default()
        }
    }
}
