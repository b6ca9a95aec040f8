//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Error type definitions (`thiserror` enums per collaborator)
//! - Resolution statistics tracking
//! - Retry strategy configuration for transport failures
//!
//! Failures fall into two groups:
//! - **Recovered locally**: non-OK geocode status, empty reports, unmatched
//!   names. These never surface as `Err`; they are only counted.
//! - **Propagated**: transport failures and timeouts. The caller logs them and
//!   abandons that one resolution.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retriable_reqwest_error};
pub use stats::ResolutionStats;
pub use types::{
    ErrorType, GeocodeError, InitializationError, NotificationError, ReportError, ResolveError,
    StoreError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolution_stats_initialization() {
        let stats = ResolutionStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.resolved_count(), 0);
    }

    #[test]
    fn test_resolution_stats_increment() {
        let stats = ResolutionStats::new();
        stats.increment_error(ErrorType::ReportUnavailable);
        stats.increment_error(ErrorType::ReportUnavailable);
        stats.increment_error(ErrorType::GeocodeStatusNotOk);
        stats.increment_resolved();

        assert_eq!(stats.get_error_count(ErrorType::ReportUnavailable), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.resolved_count(), 1);
    }

    #[test]
    fn test_error_type_labels_are_unique() {
        let labels: std::collections::HashSet<&str> =
            ErrorType::iter().map(|e| e.as_str()).collect();
        assert_eq!(labels.len(), ErrorType::iter().count());
    }

    #[test]
    fn test_resolve_error_categorization() {
        let timeout = ResolveError::Timeout(10);
        assert_eq!(ErrorType::from(&timeout), ErrorType::ResolutionTimeout);

        let malformed = ResolveError::Report(ReportError::Malformed("bad lat".into()));
        assert_eq!(ErrorType::from(&malformed), ErrorType::ReportMalformed);

        let store = ResolveError::Store(StoreError::Poisoned);
        assert_eq!(ErrorType::from(&store), ErrorType::StoreError);
    }

    #[test]
    fn test_resolve_error_display_is_transparent() {
        let err = ResolveError::from(ReportError::Malformed("lat \"abc\"".into()));
        assert_eq!(err.to_string(), "Malformed report payload: lat \"abc\"");
    }
}
