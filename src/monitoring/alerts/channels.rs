//! Notifier implementations

use super::types::{AlertChannel, AlertEvent};
use crate::monitoring::types::AlertSeverity;
use crate::utils::error::Result;
use tracing::{error, info, warn};

/// Outbound delivery of fired alerts.
///
/// The engine calls `send` once per channel listed on the rule. Failures are
/// counted and logged by the engine; they never reach the code that recorded
/// the metric.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Deliver `event` over `channel`
    async fn send(&self, event: &AlertEvent, channel: AlertChannel) -> Result<()>;

    /// Notifier name used in logs
    fn name(&self) -> &str;

    /// Check if the notifier wants events of this severity
    fn supports_severity(&self, _severity: AlertSeverity) -> bool {
        true
    }
}

/// Notifier that writes alerts to the tracing log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    min_severity: AlertSeverity,
}

impl LogNotifier {
    pub fn new(min_severity: AlertSeverity) -> Self {
        Self { min_severity }
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, event: &AlertEvent, channel: AlertChannel) -> Result<()> {
        match event.severity() {
            AlertSeverity::Critical | AlertSeverity::Error => error!(
                rule_id = %event.rule.id,
                channel = %channel,
                severity = %event.severity(),
                "{}",
                event.summary()
            ),
            AlertSeverity::Warning => warn!(
                rule_id = %event.rule.id,
                channel = %channel,
                "{}",
                event.summary()
            ),
            AlertSeverity::Info => info!(
                rule_id = %event.rule.id,
                channel = %channel,
                "{}",
                event.summary()
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}

/// Notifier that accepts and discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, _event: &AlertEvent, _channel: AlertChannel) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
