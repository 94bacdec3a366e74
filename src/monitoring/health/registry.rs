//! Registry of named asynchronous health checks

use super::system::{MEMORY_CHECK, evaluate_memory, memory_usage};
use super::types::{CheckOutcome, HealthCheckResult, SystemHealthSummary};
use crate::config::HealthConfig;
use crate::utils::error::{ObservabilityError, Result};
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

type CheckFn = Arc<dyn Fn() -> BoxFuture<'static, Result<CheckOutcome>> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    check: CheckFn,
    timeout: Option<Duration>,
}

/// Named health checks, run on demand.
///
/// Each run is spawned onto the tokio runtime and bounded by its own
/// timeout, so a check that errors, panics or hangs becomes an `Unhealthy`
/// result instead of an error for the caller.
#[derive(Clone)]
pub struct HealthCheckRegistry {
    checks: Arc<RwLock<HashMap<String, Registration>>>,
    default_timeout: Duration,
}

impl std::fmt::Debug for HealthCheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthCheckRegistry")
            .field("checks", &self.names())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl Default for HealthCheckRegistry {
    fn default() -> Self {
        Self::new(&HealthConfig::default())
    }
}

impl HealthCheckRegistry {
    /// Create a registry with the built-in memory check
    pub fn new(config: &HealthConfig) -> Self {
        let registry = Self::empty(config.check_timeout());

        let degraded = config.memory_degraded_percent;
        let unhealthy = config.memory_unhealthy_percent;
        registry.register(MEMORY_CHECK, move || async move {
            Ok(evaluate_memory(memory_usage(), degraded, unhealthy))
        });

        registry
    }

    /// Create a registry with no checks
    pub fn empty(default_timeout: Duration) -> Self {
        Self {
            checks: Arc::new(RwLock::new(HashMap::new())),
            default_timeout,
        }
    }

    /// Timeout applied to checks registered without their own
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Register a check under `name`, replacing any existing one
    pub fn register<F, Fut>(&self, name: impl Into<String>, check: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CheckOutcome>> + Send + 'static,
    {
        self.insert(name.into(), check, None);
    }

    /// Register a check with its own timeout
    pub fn register_with_timeout<F, Fut>(
        &self,
        name: impl Into<String>,
        timeout: Duration,
        check: F,
    )
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CheckOutcome>> + Send + 'static,
    {
        self.insert(name.into(), check, Some(timeout));
    }

    fn insert<F, Fut>(&self, name: String, check: F, timeout: Option<Duration>)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CheckOutcome>> + Send + 'static,
    {
        let check: CheckFn = Arc::new(move || check().boxed());
        let replaced = self
            .checks
            .write()
            .insert(name.clone(), Registration { check, timeout })
            .is_some();

        if replaced {
            info!(check = %name, "Replaced health check");
        } else {
            debug!(check = %name, "Registered health check");
        }
    }

    /// Remove a check; returns whether it was registered
    pub fn unregister(&self, name: &str) -> bool {
        self.checks.write().remove(name).is_some()
    }

    /// Registered check names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.checks.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.checks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.read().is_empty()
    }

    /// Run a single check.
    ///
    /// Only an unregistered `name` is an error; every failure of the check
    /// itself is reported as an `Unhealthy` result.
    pub async fn run(&self, name: &str) -> Result<HealthCheckResult> {
        let registration = self
            .checks
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ObservabilityError::UnknownCheck(name.to_string()))?;

        let timeout = registration.timeout.unwrap_or(self.default_timeout);
        Ok(execute(name.to_string(), registration.check, timeout).await)
    }

    /// Run every registered check concurrently, one result per name
    pub async fn run_all(&self) -> Vec<HealthCheckResult> {
        // snapshot so registration stays unblocked while checks run
        let registrations: Vec<(String, Registration)> = self
            .checks
            .read()
            .iter()
            .map(|(name, reg)| (name.clone(), reg.clone()))
            .collect();

        let default_timeout = self.default_timeout;
        let mut results = join_all(registrations.into_iter().map(|(name, reg)| {
            execute(name, reg.check, reg.timeout.unwrap_or(default_timeout))
        }))
        .await;

        results.sort_by(|a, b| a.service.cmp(&b.service));
        results
    }

    /// Run every check and fold the results into a summary
    pub async fn get_system_health(&self) -> SystemHealthSummary {
        SystemHealthSummary::from_results(self.run_all().await)
    }
}

async fn execute(name: String, check: CheckFn, timeout: Duration) -> HealthCheckResult {
    let start = Instant::now();

    // invoking the closure inside the task keeps a panicking check contained
    let mut handle = tokio::spawn(async move { check().await });

    let outcome = match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(Ok(outcome))) => Ok(outcome),
        Ok(Ok(Err(e))) => Err(e.to_string()),
        Ok(Err(join_error)) if join_error.is_panic() => {
            let reason = panic_reason(join_error.into_panic().as_ref());
            error!(check = %name, "Health check panicked: {}", reason);
            Err(format!("check panicked: {}", reason))
        }
        Ok(Err(join_error)) => Err(format!("check cancelled: {}", join_error)),
        Err(_) => {
            handle.abort();
            Err(format!("timeout after {}ms", timeout.as_millis()))
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match outcome {
        Ok(outcome) => HealthCheckResult::from_outcome(name, outcome, elapsed),
        Err(reason) => {
            warn!(check = %name, "Health check failed: {}", reason);
            let failure = ObservabilityError::check_failure(reason);
            HealthCheckResult::failed(name, failure.to_string(), elapsed)
        }
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
