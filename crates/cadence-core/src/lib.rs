//! Ambient building blocks shared by the Cadence scheduling crates.
//!
//! Holds configuration loading, the core error type and tracing setup.

pub mod config;
pub mod error;
pub mod logging;
