//! Health check registry integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::{HealthAssertions, find_result};
    use blipee_observability::config::HealthConfig;
    use blipee_observability::monitoring::health::MEMORY_CHECK;
    use blipee_observability::{CheckOutcome, HealthCheckRegistry, HealthStatus, ObservabilityError};
    use std::time::Duration;

    fn registry() -> HealthCheckRegistry {
        HealthCheckRegistry::new(&HealthConfig {
            check_timeout_ms: 100,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_memory_check_always_present() {
        let summary = registry().get_system_health().await;
        summary.status_of(MEMORY_CHECK);
        summary.assert_consistent();
    }

    #[tokio::test]
    async fn test_custom_check_status_round_trip() {
        let registry = registry();
        registry.register("custom", || async { Ok(CheckOutcome::degraded("read-only mode")) });

        let result = registry.run("custom").await.unwrap();
        assert_eq!(result.status, HealthStatus::Degraded);
        assert_eq!(result.service, "custom");
    }

    #[tokio::test]
    async fn test_failing_check_isolated_in_run_all() {
        let registry = registry();
        registry.register("database", || async { Ok(CheckOutcome::healthy()) });
        registry.register("storage", || async {
            Err(ObservabilityError::check_failure("bucket unreachable"))
        });

        let results = registry.run_all().await;
        assert_eq!(results.len(), 3);
        assert_eq!(find_result(&results, "database").status, HealthStatus::Healthy);
        assert_eq!(find_result(&results, "storage").status, HealthStatus::Unhealthy);
        assert!(
            find_result(&results, "storage")
                .message
                .as_deref()
                .unwrap()
                .contains("bucket unreachable")
        );
    }

    #[tokio::test]
    async fn test_slow_check_does_not_stall_others() {
        let registry = registry();
        registry.register("stuck", || async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(CheckOutcome::healthy())
        });
        registry.register("quick", || async { Ok(CheckOutcome::healthy()) });

        let start = std::time::Instant::now();
        let summary = registry.get_system_health().await;
        assert!(start.elapsed() < Duration::from_secs(5));

        assert_eq!(summary.status_of("stuck"), HealthStatus::Unhealthy);
        assert_eq!(summary.status_of("quick"), HealthStatus::Healthy);
        assert_eq!(summary.status, HealthStatus::Unhealthy);
        summary.assert_consistent();
    }

    #[tokio::test]
    async fn test_unknown_check() {
        let err = registry().run("nonexistent").await.unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_summary_serializes_with_counts() {
        let registry = HealthCheckRegistry::empty(Duration::from_secs(1));
        registry.register("a", || async { Ok(CheckOutcome::healthy()) });
        registry.register("b", || async { Ok(CheckOutcome::unhealthy("down")) });

        let json = serde_json::to_value(registry.get_system_health().await).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["healthy"], 1);
        assert_eq!(json["summary"]["unhealthy"], 1);
        assert_eq!(json["checks"].as_array().unwrap().len(), 2);
    }
}
