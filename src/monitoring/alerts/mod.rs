//! Threshold alerting
//!
//! Rules are bound to metric names and evaluated synchronously whenever the
//! store accepts a sample; fired events are delivered through a [`Notifier`].

mod channels;
mod manager;
mod processing;
mod types;

pub use channels::{LogNotifier, Notifier, NoopNotifier};
pub use manager::AlertRuleEngine;
pub use types::{AlertChannel, AlertEvent, AlertRule, AlertStats, ComparisonOperator};
