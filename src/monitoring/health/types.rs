//! Health status types and check results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Health status levels, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Fully operational
    #[default]
    Healthy,
    /// Operational but degraded
    Degraded,
    /// Not operational
    Unhealthy,
}

impl HealthStatus {
    /// Check if the status allows requests
    pub fn allows_requests(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }

    /// The worse of two statuses
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// What a check function reports; the registry adds name and timing
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub details: HashMap<String, serde_json::Value>,
}

impl CheckOutcome {
    /// Create a healthy outcome
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            details: HashMap::new(),
        }
    }

    /// Create a degraded outcome
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some(reason.into()),
            details: HashMap::new(),
        }
    }

    /// Create an unhealthy outcome
    pub fn unhealthy(reason: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(reason.into()),
            details: HashMap::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Result of one check invocation, created fresh every run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    /// Registered check name
    pub service: String,
    pub status: HealthStatus,
    /// When the check settled
    pub last_check: DateTime<Utc>,
    pub message: Option<String>,
    /// Wall time spent waiting for the check
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, serde_json::Value>,
}

impl HealthCheckResult {
    /// Build a result from what the check returned
    pub fn from_outcome(
        service: impl Into<String>,
        outcome: CheckOutcome,
        response_time_ms: u64,
    ) -> Self {
        Self {
            service: service.into(),
            status: outcome.status,
            last_check: Utc::now(),
            message: outcome.message,
            response_time_ms,
            details: outcome.details,
        }
    }

    /// Synthesize an unhealthy result for a check that failed to produce one
    pub fn failed(
        service: impl Into<String>,
        reason: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            service: service.into(),
            status: HealthStatus::Unhealthy,
            last_check: Utc::now(),
            message: Some(reason.into()),
            response_time_ms,
            details: HashMap::new(),
        }
    }
}

/// Per-status counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCounts {
    pub total: usize,
    pub healthy: usize,
    pub degraded: usize,
    pub unhealthy: usize,
}

/// Aggregate view over every registered check; derived, never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthSummary {
    /// Worst status among the checks, `Healthy` when there are none
    pub status: HealthStatus,
    pub checks: Vec<HealthCheckResult>,
    pub summary: HealthCounts,
}

impl SystemHealthSummary {
    /// Fold check results into counts and an overall status
    pub fn from_results(checks: Vec<HealthCheckResult>) -> Self {
        let mut summary = HealthCounts {
            total: checks.len(),
            ..Default::default()
        };
        let mut status = HealthStatus::Healthy;

        for check in &checks {
            match check.status {
                HealthStatus::Healthy => summary.healthy += 1,
                HealthStatus::Degraded => summary.degraded += 1,
                HealthStatus::Unhealthy => summary.unhealthy += 1,
            }
            status = status.worst(check.status);
        }

        Self {
            status,
            checks,
            summary,
        }
    }

    /// Result for a single check by name
    pub fn check(&self, service: &str) -> Option<&HealthCheckResult> {
        self.checks.iter().find(|c| c.service == service)
    }
}
