//! Alert evaluation and notifier dispatch

use super::manager::{AlertRuleEngine, MAX_PENDING_EVENTS};
use super::types::AlertEvent;
use crate::monitoring::metrics::MetricObserver;
use crate::monitoring::types::Metric;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

impl AlertRuleEngine {
    /// Evaluate the enabled rules bound to `metric.name` against its value
    pub fn evaluate(&self, metric: &Metric) -> Vec<AlertEvent> {
        self.evaluate_at(metric, Utc::now())
    }

    /// Evaluate with an explicit clock reading
    pub fn evaluate_at(&self, metric: &Metric, now: DateTime<Utc>) -> Vec<AlertEvent> {
        // read-locked fast path for metrics nobody alerts on
        if !self.storage.read().has_enabled_rules_for(&metric.name) {
            return Vec::new();
        }

        let mut fired = Vec::new();
        {
            let mut guard = self.storage.write();
            let storage = &mut *guard;

            let Some(ids) = storage.by_metric.get(&metric.name) else {
                return fired;
            };
            let ids: Vec<String> = ids.iter().cloned().collect();

            for id in ids {
                let Some(rule) = storage.rules.get_mut(&id) else {
                    continue;
                };
                if !rule.enabled || !rule.is_satisfied_by(metric.value) {
                    continue;
                }

                let cooldown = rule.cooldown().unwrap_or(self.default_cooldown);
                if let Some(last) = rule.last_triggered_at {
                    if !cooldown_elapsed(last, now, cooldown) {
                        debug!(rule_id = %rule.id, "Alert rule in cooldown");
                        continue;
                    }
                }

                rule.last_triggered_at = Some(now);
                fired.push(AlertEvent::new(rule.clone(), metric.clone(), now));
            }

            for event in &fired {
                storage.record_fired(event, self.history_limit);
            }
        }

        if !fired.is_empty() {
            self.enqueue(&fired);
        }

        fired
    }

    fn enqueue(&self, events: &[AlertEvent]) {
        let mut dropped = 0;
        {
            let mut pending = self.pending.lock();
            for event in events {
                debug!(rule_id = %event.rule.id, "Queuing alert: {}", event.summary());
                pending.push_back(event.clone());
                if pending.len() > MAX_PENDING_EVENTS {
                    pending.pop_front();
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, "Alert dispatch queue full, dropped oldest events");
            self.storage.write().stats.dropped_events += dropped;
        }
    }

    /// Hand every queued event to the notifier, once per rule channel.
    ///
    /// Send failures are logged and counted; they never undo the firing.
    /// Returns the number of events drained from the queue.
    pub async fn dispatch_pending(&self) -> usize {
        let events: Vec<AlertEvent> = self.pending.lock().drain(..).collect();
        if events.is_empty() {
            return 0;
        }

        let mut delivered = 0;
        let mut failed = 0;

        for event in &events {
            if !self.notifier.supports_severity(event.severity()) {
                continue;
            }

            for channel in &event.rule.channels {
                match self.notifier.send(event, *channel).await {
                    Ok(()) => {
                        delivered += 1;
                        debug!(
                            rule_id = %event.rule.id,
                            %channel,
                            "Alert sent via {}",
                            self.notifier.name()
                        );
                    }
                    Err(e) => {
                        failed += 1;
                        warn!(
                            rule_id = %event.rule.id,
                            %channel,
                            "Failed to send alert via {}: {}",
                            self.notifier.name(),
                            e
                        );
                    }
                }
            }
        }

        {
            let mut storage = self.storage.write();
            storage.stats.delivered_notifications += delivered;
            storage.stats.failed_notifications += failed;
        }

        events.len()
    }
}

impl MetricObserver for AlertRuleEngine {
    fn on_record(&self, metric: &Metric) {
        self.evaluate(metric);
    }
}

/// Whether at least `cooldown` has passed since `last`; a clock that moved
/// backwards counts as still cooling down
fn cooldown_elapsed(last: DateTime<Utc>, now: DateTime<Utc>, cooldown: Duration) -> bool {
    (now - last)
        .to_std()
        .map(|elapsed| elapsed >= cooldown)
        .unwrap_or(false)
}
