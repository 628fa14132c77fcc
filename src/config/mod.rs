//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, record prefixes)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{default_worker_count, Config, LogFormat, LogLevel};
