//! Configuration validation integration tests
//!
//! Verifies that configuration loads, validates correctly, and fails
//! appropriately for invalid values.

#[cfg(test)]
mod tests {
    use blipee_observability::config::{
        AlertingConfig, HealthConfig, LoggingConfig, MetricsConfig, ObservabilityConfig, Validate,
    };
    use blipee_observability::{MonitoringSystem, NoopNotifier};
    use std::io::Write;
    use std::sync::Arc;

    // ==================== Section validation ====================

    #[test]
    fn test_default_config_is_valid() {
        assert!(ObservabilityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_retention_rejected() {
        let config = MetricsConfig {
            max_samples_per_series: 0,
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("max_samples_per_series"));
    }

    #[test]
    fn test_memory_thresholds_must_be_ordered() {
        let config = HealthConfig {
            memory_degraded_percent: 90.0,
            memory_unhealthy_percent: 80.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let config = LoggingConfig {
            level: String::new(),
            json: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_history_rejected() {
        let config = AlertingConfig {
            history_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_load_file_and_build_system() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
metrics:
  max_samples_per_series: 50
alerting:
  cooldown_secs: 60
  rules:
    - id: "high-latency"
      name: "High latency"
      metric: "http_request_duration_ms"
      condition: gte
      threshold: 1500
      severity: critical
      channels: [webhook]
health:
  check_timeout_ms: 250
"#
        )
        .unwrap();

        let config = ObservabilityConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.metrics.max_samples_per_series, 50);
        assert_eq!(config.alerting.rules.len(), 1);

        let system = MonitoringSystem::new(config, Arc::new(NoopNotifier));
        assert_eq!(system.store().max_samples_per_series(), 50);
        assert!(system.alerts().has_rules_for("http_request_duration_ms"));
        assert_eq!(system.alerts().default_cooldown().as_secs(), 60);
        assert_eq!(system.health().default_timeout().as_millis(), 250);
    }

    #[tokio::test]
    async fn test_invalid_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "metrics:\n  max_samples_per_series: 0\n").unwrap();

        let err = ObservabilityConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Metrics config error"));
    }

    #[test]
    fn test_env_lookup_overrides() {
        let config = ObservabilityConfig::from_lookup(|key| match key {
            "OBSERVABILITY_ALERT_COOLDOWN_SECS" => Some("30".to_string()),
            "OBSERVABILITY_LOG_JSON" => Some("true".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.alerting.cooldown_secs, 30);
        assert!(config.logging.json);
        assert_eq!(config.health.check_timeout_ms, 5000);
    }
}
