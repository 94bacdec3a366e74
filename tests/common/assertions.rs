//! Custom test assertions

use blipee_observability::{HealthCheckResult, HealthStatus, SystemHealthSummary};

/// Assertions for health summaries
pub trait HealthAssertions {
    /// Assert a result exists for `service` and return its status
    fn status_of(&self, service: &str) -> HealthStatus;

    /// Assert the counts add up to the number of checks
    fn assert_consistent(&self);
}

impl HealthAssertions for SystemHealthSummary {
    fn status_of(&self, service: &str) -> HealthStatus {
        self.check(service)
            .unwrap_or_else(|| panic!("Expected a result for check '{}'", service))
            .status
    }

    fn assert_consistent(&self) {
        let counts = &self.summary;
        assert_eq!(counts.total, self.checks.len(), "total must match the number of checks");
        assert_eq!(
            counts.healthy + counts.degraded + counts.unhealthy,
            counts.total,
            "status counts must add up to the total"
        );
        let worst = self.checks.iter().map(|c| c.status).max().unwrap_or_default();
        assert_eq!(self.status, worst, "overall status must be the worst check status");
    }
}

/// Find a result by service name in a `run_all` output
pub fn find_result<'a>(results: &'a [HealthCheckResult], service: &str) -> &'a HealthCheckResult {
    results
        .iter()
        .find(|r| r.service == service)
        .unwrap_or_else(|| panic!("Expected a result for check '{}'", service))
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left_val: f64 = $left as f64;
        let right_val: f64 = $right as f64;
        let diff = (left_val - right_val).abs();
        assert!(
            diff < $epsilon,
            "assertion failed: `(left ~= right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`",
            left_val,
            right_val,
            diff
        );
    };
}
