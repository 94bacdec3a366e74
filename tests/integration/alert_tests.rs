//! Alert rule engine integration tests

#[cfg(test)]
mod tests {
    use crate::common::{FailingNotifier, RecordingNotifier, RuleFactory, test_system};
    use blipee_observability::{AlertChannel, Metric, ObservabilityError};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_threshold_fires_once_within_cooldown() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system
            .alerts()
            .set_rule(RuleFactory::above("t1", "test_metric", 5.0))
            .unwrap();

        system.record(Metric::gauge("test_metric", 3.0)).unwrap();
        assert_eq!(system.alerts().recent_events(10).len(), 0);

        system.record(Metric::gauge("test_metric", 10.0)).unwrap();
        assert_eq!(system.alerts().recent_events(10).len(), 1);

        system.record(Metric::gauge("test_metric", 10.0)).unwrap();
        assert_eq!(system.alerts().recent_events(10).len(), 1);
    }

    #[tokio::test]
    async fn test_rule_on_other_metric_is_not_evaluated() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system
            .alerts()
            .set_rule(RuleFactory::above("t1", "cpu_percent", 50.0))
            .unwrap();

        system.record(Metric::gauge("memory_percent", 99.0)).unwrap();
        assert_eq!(system.alerts().stats().total_alerts, 0);
    }

    #[tokio::test]
    async fn test_below_rule_notifies_every_channel() {
        let notifier = Arc::new(RecordingNotifier::default());
        let system = test_system(notifier.clone());
        system
            .alerts()
            .set_rule(RuleFactory::below("low-disk", "disk_free_gb", 5.0))
            .unwrap();

        system.record(Metric::gauge("disk_free_gb", 2.0)).unwrap();
        system.alerts().dispatch_pending().await;

        let sent = notifier.sent.lock().clone();
        assert_eq!(
            sent,
            vec![
                ("low-disk".to_string(), AlertChannel::Email),
                ("low-disk".to_string(), AlertChannel::Slack),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_notifier_keeps_rule_triggered() {
        let system = test_system(Arc::new(FailingNotifier));
        system
            .alerts()
            .set_rule(RuleFactory::below("low-disk", "disk_free_gb", 5.0))
            .unwrap();

        system.record(Metric::gauge("disk_free_gb", 1.0)).unwrap();
        assert_eq!(system.alerts().dispatch_pending().await, 1);

        let stats = system.alerts().stats();
        assert_eq!(stats.total_alerts, 1);
        assert_eq!(stats.failed_notifications, 2);
        assert!(
            system
                .alerts()
                .get_rule("low-disk")
                .unwrap()
                .last_triggered_at
                .is_some()
        );

        // still cooling down after the failed delivery
        system.record(Metric::gauge("disk_free_gb", 1.0)).unwrap();
        assert_eq!(system.alerts().stats().total_alerts, 1);
    }

    #[tokio::test]
    async fn test_disable_and_reenable() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        system
            .alerts()
            .set_rule(RuleFactory::above("t1", "test_metric", 5.0))
            .unwrap();

        system.alerts().set_enabled("t1", false).unwrap();
        system.record(Metric::gauge("test_metric", 10.0)).unwrap();
        assert_eq!(system.alerts().stats().total_alerts, 0);

        system.alerts().set_enabled("t1", true).unwrap();
        system.record(Metric::gauge("test_metric", 10.0)).unwrap();
        assert_eq!(system.alerts().stats().total_alerts, 1);
    }

    #[tokio::test]
    async fn test_unknown_rule_toggle_fails_loudly() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let err = system.alerts().set_enabled("nope", false).unwrap_err();
        assert!(matches!(err, ObservabilityError::RuleNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_and_remove_rules() {
        let system = test_system(Arc::new(RecordingNotifier::default()));
        let alerts = system.alerts();
        alerts.set_rule(RuleFactory::above("b", "m", 1.0)).unwrap();
        alerts.set_rule(RuleFactory::above("a", "m", 1.0)).unwrap();
        alerts.set_rule(RuleFactory::above("a", "m", 2.0)).unwrap();

        let rules = alerts.list_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "a");
        assert_eq!(rules[0].threshold, 2.0);

        alerts.remove_rule("a");
        alerts.remove_rule("b");
        assert!(alerts.list_rules().is_empty());
        assert!(!alerts.has_rules_for("m"));
    }
}
