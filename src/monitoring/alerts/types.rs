//! Alert types and data structures

use crate::monitoring::types::{AlertSeverity, Metric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::time::Duration;

/// Consolidated alert storage - single lock for related data
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    /// Alert rules by id
    pub rules: HashMap<String, AlertRule>,
    /// Rule ids bound to each metric name
    pub by_metric: HashMap<String, BTreeSet<String>>,
    /// Fired events, oldest first
    pub history: VecDeque<AlertEvent>,
    /// Alert statistics
    pub stats: AlertStats,
}

impl AlertStorage {
    /// Insert or replace a rule, keeping the metric index in sync
    pub fn insert(&mut self, rule: AlertRule) -> Option<AlertRule> {
        let previous = self.remove(&rule.id);
        self.by_metric
            .entry(rule.metric.clone())
            .or_default()
            .insert(rule.id.clone());
        self.rules.insert(rule.id.clone(), rule);
        previous
    }

    pub fn remove(&mut self, id: &str) -> Option<AlertRule> {
        let rule = self.rules.remove(id)?;
        if let Some(ids) = self.by_metric.get_mut(&rule.metric) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_metric.remove(&rule.metric);
            }
        }
        Some(rule)
    }

    pub fn has_enabled_rules_for(&self, metric: &str) -> bool {
        self.by_metric.get(metric).is_some_and(|ids| {
            ids.iter()
                .any(|id| self.rules.get(id).is_some_and(|r| r.enabled))
        })
    }

    /// Append a fired event to the history and update statistics
    pub fn record_fired(&mut self, event: &AlertEvent, history_limit: usize) {
        self.stats.total_alerts += 1;
        *self
            .stats
            .alerts_by_severity
            .entry(event.severity().to_string().to_lowercase())
            .or_insert(0) += 1;
        self.stats.last_alert = Some(event.fired_at);

        self.history.push_back(event.clone());
        while self.history.len() > history_limit {
            self.history.pop_front();
        }
    }
}

/// Comparison applied as `metric.value <op> rule.threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "gte")]
    GreaterThanOrEqual,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "lte")]
    LessThanOrEqual,
    #[serde(rename = "eq")]
    Equal,
}

impl ComparisonOperator {
    /// Apply the comparison
    pub fn evaluate(self, value: f64, threshold: f64) -> bool {
        match self {
            ComparisonOperator::GreaterThan => value > threshold,
            ComparisonOperator::GreaterThanOrEqual => value >= threshold,
            ComparisonOperator::LessThan => value < threshold,
            ComparisonOperator::LessThanOrEqual => value <= threshold,
            ComparisonOperator::Equal => value == threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::Equal => "==",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Delivery channel named by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertChannel {
    Email,
    Slack,
    Webhook,
    Sms,
    InApp,
}

impl std::fmt::Display for AlertChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlertChannel::Email => "email",
            AlertChannel::Slack => "slack",
            AlertChannel::Webhook => "webhook",
            AlertChannel::Sms => "sms",
            AlertChannel::InApp => "in_app",
        };
        f.write_str(name)
    }
}

/// Threshold rule bound to a metric name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    /// Unique rule id
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Metric name the rule is evaluated against
    pub metric: String,
    pub condition: ComparisonOperator,
    pub threshold: f64,
    #[serde(default)]
    pub severity: AlertSeverity,
    #[serde(default)]
    pub channels: BTreeSet<AlertChannel>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Overrides the engine-wide cooldown
    #[serde(default, alias = "cooldown_secs")]
    pub cooldown_secs: Option<u64>,
    /// Set only when the rule fires
    #[serde(default, alias = "last_triggered_at")]
    pub last_triggered_at: Option<DateTime<Utc>>,
}

fn default_enabled() -> bool {
    true
}

impl AlertRule {
    /// Create an enabled rule with Info severity and no channels
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        metric: impl Into<String>,
        condition: ComparisonOperator,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            metric: metric.into(),
            condition,
            threshold,
            severity: AlertSeverity::Info,
            channels: BTreeSet::new(),
            enabled: true,
            cooldown_secs: None,
            last_triggered_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_channel(mut self, channel: AlertChannel) -> Self {
        self.channels.insert(channel);
        self
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = AlertChannel>) -> Self {
        self.channels.extend(channels);
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_secs = Some(cooldown.as_secs());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Per-rule cooldown override
    pub fn cooldown(&self) -> Option<Duration> {
        self.cooldown_secs.map(Duration::from_secs)
    }

    /// Whether `value` satisfies the rule's condition
    pub fn is_satisfied_by(&self, value: f64) -> bool {
        self.condition.evaluate(value, self.threshold)
    }
}

/// A rule firing, handed to the notifier once per channel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    /// Event ID
    pub id: String,
    /// Rule as it was when it fired
    pub rule: AlertRule,
    /// Sample that satisfied the rule
    pub metric: Metric,
    pub fired_at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(rule: AlertRule, metric: Metric, fired_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rule,
            metric,
            fired_at,
        }
    }

    pub fn severity(&self) -> AlertSeverity {
        self.rule.severity
    }

    /// One-line human description
    pub fn summary(&self) -> String {
        format!(
            "Rule '{}' triggered: {} {} {} (current value: {})",
            self.rule.name,
            self.rule.metric,
            self.rule.condition,
            self.rule.threshold,
            self.metric.value
        )
    }
}

/// Alert statistics
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    /// Total rule firings
    pub total_alerts: u64,
    /// Firings by severity
    pub alerts_by_severity: HashMap<String, u64>,
    /// Successful notifier sends
    pub delivered_notifications: u64,
    /// Failed notifier sends
    pub failed_notifications: u64,
    /// Events dropped because the dispatch queue was full
    pub dropped_events: u64,
    /// Last firing timestamp
    pub last_alert: Option<DateTime<Utc>>,
}
