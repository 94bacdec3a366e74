//! Utility modules for the observability core
//!
//! - **error**: Error type and result alias
//! - **logging**: `tracing` subscriber initialisation

pub mod error;
pub mod logging;

pub use error::{ObservabilityError, Result};
