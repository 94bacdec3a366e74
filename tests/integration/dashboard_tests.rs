//! Dashboard facade integration tests

#[cfg(test)]
mod tests {
    use crate::common::{RecordingNotifier, RuleFactory, test_system};
    use blipee_observability::{CheckOutcome, Metric, ObservabilityError};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_dashboard_keys_present_when_empty() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let json = serde_json::to_value(system.get_dashboard().await).unwrap();

        for key in ["metrics", "alerts", "healthChecks", "recentEvents"] {
            assert!(
                json.get(key).is_some_and(|v| !v.is_null()),
                "dashboard is missing '{}'",
                key
            );
        }
        assert_eq!(json["alerts"], serde_json::json!([]));
        assert_eq!(json["recentEvents"], serde_json::json!([]));
        assert_eq!(json["metrics"]["series"], serde_json::json!([]));
        assert_eq!(json["degradedSections"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_dashboard_reflects_activity() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system
            .alerts()
            .set_rule(RuleFactory::above("errors", "errors_total", 0.0))
            .unwrap();

        system.collector().record_error("timeout", "/api/emissions");
        system
            .collector()
            .record_http_request("GET", "/api/emissions", 504, 30_000.0, None);

        let dashboard = system.get_dashboard().await;
        assert_eq!(dashboard.metrics.total_series, 3);
        assert_eq!(dashboard.alerts.len(), 1);
        assert_eq!(dashboard.recent_events.len(), 1);
        assert_eq!(dashboard.recent_events[0].rule.id, "errors");
        assert_eq!(dashboard.alert_stats.total_alerts, 1);
    }

    #[tokio::test]
    async fn test_dashboard_renders_with_failing_checks() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system.record(Metric::gauge("energy_kwh", 12.5)).unwrap();
        system.health().register("erp", || async {
            Err(ObservabilityError::check_failure("ERP sync failed"))
        });
        system
            .health()
            .register_with_timeout("grid", Duration::from_millis(10), || async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(CheckOutcome::healthy())
            });

        let dashboard = system.get_dashboard().await;
        assert_eq!(dashboard.metrics.total_series, 1);
        assert_eq!(dashboard.health_checks.len(), 3);
        let unhealthy = dashboard
            .health_checks
            .iter()
            .filter(|c| c.service != "memory")
            .all(|c| c.status == blipee_observability::HealthStatus::Unhealthy);
        assert!(unhealthy);
    }

    #[tokio::test]
    async fn test_dashboard_is_read_only() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system.record(Metric::counter("visits", 1.0)).unwrap();

        let first = system.get_dashboard().await;
        let second = system.get_dashboard().await;
        assert_eq!(first.metrics.total_samples, second.metrics.total_samples);
        assert_eq!(system.store().sample_count(), 1);
    }
}
