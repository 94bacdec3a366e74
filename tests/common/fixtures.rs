//! Test fixtures and notifier doubles

use blipee_observability::{
    AlertChannel, AlertEvent, AlertRule, AlertSeverity, ComparisonOperator, MonitoringSystem,
    Notifier, ObservabilityConfig, ObservabilityError, Result,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifier that remembers every `(rule id, channel)` it was asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, AlertChannel)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, event: &AlertEvent, channel: AlertChannel) -> Result<()> {
        self.sent.lock().push((event.rule.id.clone(), channel));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Notifier that fails every send
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _event: &AlertEvent, channel: AlertChannel) -> Result<()> {
        Err(ObservabilityError::notifier(format!("{} gateway down", channel)))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Build a system with default configuration around `notifier`
pub fn test_system(notifier: Arc<dyn Notifier>) -> MonitoringSystem {
    MonitoringSystem::new(ObservabilityConfig::default(), notifier)
}

/// Factory for alert rules
pub struct RuleFactory;

impl RuleFactory {
    /// `metric > threshold`, warning severity, in-app channel
    pub fn above(id: &str, metric: &str, threshold: f64) -> AlertRule {
        AlertRule::new(
            id,
            format!("{} above {}", metric, threshold),
            metric,
            ComparisonOperator::GreaterThan,
            threshold,
        )
        .with_severity(AlertSeverity::Warning)
        .with_channel(AlertChannel::InApp)
    }

    /// `metric < threshold`, critical severity, email and slack
    pub fn below(id: &str, metric: &str, threshold: f64) -> AlertRule {
        AlertRule::new(
            id,
            format!("{} below {}", metric, threshold),
            metric,
            ComparisonOperator::LessThan,
            threshold,
        )
        .with_severity(AlertSeverity::Critical)
        .with_channels([AlertChannel::Email, AlertChannel::Slack])
    }
}
