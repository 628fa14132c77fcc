//! Main application modules.
//!
//! This module provides progress logging, shutdown handling and statistics
//! printing used around a check run.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::{shutdown_gracefully, spawn_interrupt_watcher};
pub use statistics::{print_error_statistics, print_simple_summary};
