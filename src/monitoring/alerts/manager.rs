//! Alert rule engine

use super::channels::Notifier;
use super::types::{AlertEvent, AlertRule, AlertStats, AlertStorage};
use crate::config::AlertingConfig;
use crate::utils::error::{ObservabilityError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on events waiting for the notifier
pub(super) const MAX_PENDING_EVENTS: usize = 1000;

/// Owns the live rule set and turns recorded metrics into alert events.
///
/// Evaluation is synchronous and only touches in-memory state. Fired events
/// are queued and handed to the [`Notifier`] by [`AlertRuleEngine::dispatch_pending`],
/// which the monitoring system drives from a background task.
#[derive(Debug, Clone)]
pub struct AlertRuleEngine {
    /// Rules, history and statistics behind one lock
    pub(super) storage: Arc<RwLock<AlertStorage>>,
    /// Fired events not yet handed to the notifier
    pub(super) pending: Arc<Mutex<VecDeque<AlertEvent>>>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) default_cooldown: Duration,
    pub(super) history_limit: usize,
}

impl AlertRuleEngine {
    /// Create an engine with the given notifier, preloading configured rules.
    ///
    /// Configured rules that fail validation are logged and skipped.
    pub fn new(config: &AlertingConfig, notifier: Arc<dyn Notifier>) -> Self {
        let engine = Self {
            storage: Arc::new(RwLock::new(AlertStorage::default())),
            pending: Arc::new(Mutex::new(VecDeque::new())),
            notifier,
            default_cooldown: config.cooldown(),
            history_limit: config.history_limit.max(1),
        };

        for rule in &config.rules {
            if let Err(e) = engine.set_rule(rule.clone()) {
                warn!("Skipping configured alert rule: {}", e);
            }
        }

        engine
    }

    /// Cooldown applied to rules without their own override
    pub fn default_cooldown(&self) -> Duration {
        self.default_cooldown
    }

    /// Insert or replace a rule by id.
    ///
    /// Replacing a rule keeps its `last_triggered_at` unless the new rule
    /// carries its own, so an edit cannot be used to skip the cooldown.
    pub fn set_rule(&self, mut rule: AlertRule) -> Result<()> {
        validate_rule(&rule)?;

        let mut storage = self.storage.write();
        if rule.last_triggered_at.is_none() {
            rule.last_triggered_at = storage
                .rules
                .get(&rule.id)
                .and_then(|existing| existing.last_triggered_at);
        }

        info!(rule_id = %rule.id, metric = %rule.metric, "Setting alert rule: {}", rule.name);
        storage.insert(rule);
        Ok(())
    }

    /// Remove a rule; returns the removed rule if it existed
    pub fn remove_rule(&self, id: &str) -> Option<AlertRule> {
        let removed = self.storage.write().remove(id);
        if removed.is_some() {
            info!(rule_id = %id, "Removed alert rule");
        }
        removed
    }

    pub fn get_rule(&self, id: &str) -> Option<AlertRule> {
        self.storage.read().rules.get(id).cloned()
    }

    /// All rules, sorted by id
    pub fn list_rules(&self) -> Vec<AlertRule> {
        let mut rules: Vec<AlertRule> = self.storage.read().rules.values().cloned().collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    pub fn rule_count(&self) -> usize {
        self.storage.read().rules.len()
    }

    /// Enable or disable a rule without touching its cooldown clock
    pub fn set_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        let mut storage = self.storage.write();
        let rule = storage
            .rules
            .get_mut(id)
            .ok_or_else(|| ObservabilityError::RuleNotFound(id.to_string()))?;
        rule.enabled = enabled;
        debug!(rule_id = %id, enabled, "Toggled alert rule");
        Ok(())
    }

    /// Whether at least one enabled rule is bound to `metric`
    pub fn has_rules_for(&self, metric: &str) -> bool {
        self.storage.read().has_enabled_rules_for(metric)
    }

    /// Most recent fired events, newest first
    pub fn recent_events(&self, limit: usize) -> Vec<AlertEvent> {
        self.storage
            .read()
            .history
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }

    /// Events waiting for the notifier
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

fn validate_rule(rule: &AlertRule) -> Result<()> {
    if rule.id.trim().is_empty() {
        return Err(ObservabilityError::InvalidRule(
            "rule id cannot be empty".to_string(),
        ));
    }
    if rule.metric.trim().is_empty() {
        return Err(ObservabilityError::InvalidRule(format!(
            "rule '{}' has no metric",
            rule.id
        )));
    }
    if !rule.threshold.is_finite() {
        return Err(ObservabilityError::InvalidRule(format!(
            "rule '{}' has non-finite threshold",
            rule.id
        )));
    }
    Ok(())
}
