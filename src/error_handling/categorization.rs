//! Retry strategy and transport error classification.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

/// Creates an exponential backoff retry strategy for transport failures.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR`
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - Maximum retries: `RETRY_MAX_ATTEMPTS`
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}

/// Determines if a `reqwest::Error` is worth retrying.
///
/// Retriable: 429, 5xx, timeouts and connection failures.
/// Everything else (4xx, decode errors, redirects, builder errors) is permanent.
pub fn is_retriable_reqwest_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        let status_code = status.as_u16();
        if status_code == crate::config::HTTP_STATUS_TOO_MANY_REQUESTS {
            return true;
        }
        return status.is_server_error();
    }

    if error.is_decode() || error.is_redirect() || error.is_builder() {
        return false;
    }

    error.is_timeout() || error.is_connect() || error.is_request()
}
