//! Lookup failure statistics.
//!
//! This module provides thread-safe counters for the recoverable failures seen
//! while inspecting domains.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe processing statistics tracker.
///
/// Tracks recoverable errors using atomic counters, allowing concurrent access
/// from every worker. All error types are initialized to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let errors = ErrorType::iter()
            .map(|error| (error, AtomicUsize::new(0)))
            .collect();
        ProcessingStats { errors }
    }

    /// Increment an error counter.
    ///
    /// Never panics: every `ErrorType` is inserted by `new()`, and a missing
    /// entry is logged instead.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
