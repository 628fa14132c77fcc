//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, initialization, lookups and runs
//! - Lookup failure statistics shared by all workers
//!
//! Only [`CheckError`], [`ConfigError`] and [`InitializationError`] end a run.
//! [`LookupError`]s are recovered inside the domain inspector and counted by
//! [`ErrorType`].

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{CheckError, ConfigError, ErrorType, InitializationError, LookupError};
