//! Resolution statistics tracking.
//!
//! Thread-safe counters for the failure kinds seen during a session, so that
//! concurrent corner resolutions can report into the same tally.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe resolution statistics tracker.
///
/// Every `ErrorType` is initialized to zero on creation, and counters are
/// plain atomics so the struct can be shared behind an `Arc`.
pub struct ResolutionStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    resolved: AtomicUsize,
}

impl ResolutionStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        ResolutionStats {
            errors,
            resolved: AtomicUsize::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                error
            );
        }
    }

    /// Record one completed resolution.
    pub fn increment_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of resolutions that completed.
    pub fn resolved_count(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Logs every non-zero counter at info level.
    pub fn log_summary(&self) {
        log::info!(
            "Resolutions: {} completed, {} issues",
            self.resolved_count(),
            self.total_errors()
        );
        for error_type in ErrorType::iter() {
            let count = self.get_error_count(error_type);
            if count > 0 {
                log::info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}

impl Default for ResolutionStats {
    fn default() -> Self {
        Self::new()
    }
}
