//! Built-in memory check backed by sysinfo
//!
//! The check classifies the resident set size of the current process as a
//! share of host memory. Real probing happens only when the `metrics`
//! feature is enabled; without it the probe reports zero total memory and
//! the check stays healthy.

use super::types::{CheckOutcome, HealthStatus};

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use sysinfo::{ProcessesToUpdate, System};

/// Name the memory check is registered under
pub const MEMORY_CHECK: &str = "memory";

#[cfg(feature = "metrics")]
static SYSTEM: Lazy<parking_lot::Mutex<System>> =
    Lazy::new(|| parking_lot::Mutex::new(System::new()));

/// Point-in-time reading of this process's resident memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    /// Resident set size of the current process
    pub resident_bytes: u64,
    /// Physical memory of the host
    pub total_bytes: u64,
}

impl MemoryUsage {
    /// Resident memory as a percentage of host memory, `None` when total is unknown
    pub fn resident_percent(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            return None;
        }
        Some(self.resident_bytes as f64 / self.total_bytes as f64 * 100.0)
    }
}

#[cfg(feature = "metrics")]
pub fn memory_usage() -> MemoryUsage {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return MemoryUsage::default();
    };

    let mut sys = SYSTEM.lock();
    sys.refresh_memory();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    match sys.process(pid) {
        Some(process) => MemoryUsage {
            resident_bytes: process.memory(),
            total_bytes: sys.total_memory(),
        },
        None => MemoryUsage::default(),
    }
}

#[cfg(not(feature = "metrics"))]
pub fn memory_usage() -> MemoryUsage {
    MemoryUsage::default()
}

/// Map a resident-memory percentage onto a status given the two thresholds
pub fn classify_memory(
    resident_percent: f64,
    degraded_percent: f64,
    unhealthy_percent: f64,
) -> HealthStatus {
    if resident_percent >= unhealthy_percent {
        HealthStatus::Unhealthy
    } else if resident_percent >= degraded_percent {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

/// Evaluate a memory reading against the thresholds
pub fn evaluate_memory(
    usage: MemoryUsage,
    degraded_percent: f64,
    unhealthy_percent: f64,
) -> CheckOutcome {
    let Some(percent) = usage.resident_percent() else {
        return CheckOutcome::healthy().with_message("memory probe unavailable");
    };

    let outcome = match classify_memory(percent, degraded_percent, unhealthy_percent) {
        HealthStatus::Healthy => CheckOutcome::healthy(),
        HealthStatus::Degraded => CheckOutcome::degraded(format!(
            "Resident memory {:.1}% of host exceeds {:.1}%",
            percent, degraded_percent
        )),
        HealthStatus::Unhealthy => CheckOutcome::unhealthy(format!(
            "Resident memory {:.1}% of host exceeds {:.1}%",
            percent, unhealthy_percent
        )),
    };

    outcome
        .with_detail("resident_bytes", usage.resident_bytes)
        .with_detail("total_bytes", usage.total_bytes)
        .with_detail("resident_percent", (percent * 10.0).round() / 10.0)
}
