//! Error handling for the observability core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the observability core
pub type Result<T> = std::result::Result<T, ObservabilityError>;

/// Main error type for the observability core
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// Malformed metric rejected at the recording boundary
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// A health check raised, timed out, or produced unusable data
    #[error("Health check failed: {0}")]
    CheckFailure(String),

    /// The outbound alert notifier failed to deliver an event
    #[error("Notifier error: {0}")]
    NotifierFailure(String),

    /// `run` was called with a name that was never registered
    #[error("Unknown health check: {0}")]
    UnknownCheck(String),

    /// An alert rule id that is not part of the live rule set
    #[error("Alert rule not found: {0}")]
    RuleNotFound(String),

    /// Alert rule that violates the rule-set invariants
    #[error("Invalid alert rule: {0}")]
    InvalidRule(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ObservabilityError {
    /// Create an invalid metric error
    pub fn invalid_metric(msg: impl Into<String>) -> Self {
        Self::InvalidMetric(msg.into())
    }

    /// Create a check failure error
    pub fn check_failure(msg: impl Into<String>) -> Self {
        Self::CheckFailure(msg.into())
    }

    /// Create a notifier failure error
    pub fn notifier(msg: impl Into<String>) -> Self {
        Self::NotifierFailure(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Programming-contract violations that callers must see.
    ///
    /// Everything else is an operational failure that the components absorb
    /// and convert into data (an `Unhealthy` result, a dropped sample, a
    /// counted notifier failure).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownCheck(_) | Self::RuleNotFound(_) | Self::InvalidRule(_)
        )
    }

    /// Short machine-readable code for logs and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMetric(_) => "invalid_metric",
            Self::CheckFailure(_) => "check_failure",
            Self::NotifierFailure(_) => "notifier_failure",
            Self::UnknownCheck(_) => "unknown_check",
            Self::RuleNotFound(_) => "rule_not_found",
            Self::InvalidRule(_) => "invalid_rule",
            Self::Config(_) => "config",
            Self::Timeout(_) => "timeout",
            Self::Io(_) => "io",
            Self::Yaml(_) => "yaml",
            Self::Serialization(_) => "serialization",
        }
    }
}
