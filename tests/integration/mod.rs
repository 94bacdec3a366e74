//! Integration tests for blipee-observability
//!
//! These tests drive the public API the way request-handling code would,
//! without reaching into private modules.

pub mod alert_tests;
pub mod config_validation_tests;
pub mod dashboard_tests;
pub mod error_handling_tests;
pub mod health_tests;
