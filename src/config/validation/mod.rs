//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! - `trait_def`: Core Validate trait definition
//! - `monitoring_validators`: Metrics, alerting, health and logging validators
//! - `tests`: Test suite for all validators

mod monitoring_validators;
mod trait_def;

pub use trait_def::Validate;
