//! Health checking system
//!
//! Named asynchronous checks with per-check timeout and failure isolation.

mod registry;
mod system;
mod types;


pub use registry::HealthCheckRegistry;
pub(crate) use registry::panic_reason;
pub use system::{MEMORY_CHECK, MemoryUsage, classify_memory, evaluate_memory, memory_usage};
pub use types::{CheckOutcome, HealthCheckResult, HealthCounts, HealthStatus, SystemHealthSummary};
