//! Common test utilities
//!
//! - Fixture builders for systems, rules and metrics
//! - Notifier doubles
//! - Custom assertions

pub mod assertions;
pub mod fixtures;

pub use fixtures::{FailingNotifier, RecordingNotifier, RuleFactory, test_system};
