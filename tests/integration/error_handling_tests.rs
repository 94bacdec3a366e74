//! Error handling integration tests
//!
//! Operational failures are absorbed as data; only contract violations
//! reach the caller.

#[cfg(test)]
mod tests {
    use crate::common::{RecordingNotifier, test_system};
    use blipee_observability::{AlertRule, ComparisonOperator, Metric, ObservabilityError};
    use std::sync::Arc;

    #[test]
    fn test_non_finite_values_rejected() {
        let system = test_system(Arc::new(RecordingNotifier::default()));

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = system.record(Metric::gauge("temperature_c", value)).unwrap_err();
            assert_eq!(err.code(), "invalid_metric");
            assert!(!err.is_contract_violation());
        }

        let snapshot = system.store().snapshot();
        assert_eq!(snapshot.rejected_samples, 3);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let err = system.record(Metric::counter("  ", 1.0)).unwrap_err();
        assert!(matches!(err, ObservabilityError::InvalidMetric(_)));
    }

    #[test]
    fn test_collector_swallows_invalid_values() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system
            .collector()
            .record_http_request("GET", "/api/targets", 200, f64::NAN, None);

        // the counter lands, the NaN duration is dropped
        assert_eq!(system.store().sample_count(), 1);
    }

    #[test]
    fn test_invalid_rule_rejected() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let rule = AlertRule::new("r", "No metric", "", ComparisonOperator::Equal, 1.0);
        let err = system.alerts().set_rule(rule).unwrap_err();
        assert_eq!(err.code(), "invalid_rule");
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_unknown_check_propagates() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let err = system.health().run("payments").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown health check: payments");
    }
}
