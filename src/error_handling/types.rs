//! Error type definitions.
//!
//! This module defines all error types used throughout the crate, plus the
//! `ErrorType` tags tallied by [`super::ResolutionStats`].

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while talking to the geocoding service.
///
/// A non-OK status is *not* an error; it is reported through the response
/// status and turned into "no hierarchy available" by the caller.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Network or HTTP-level failure.
    #[error("Geocoding request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The request URL could not be built from the configured base URL.
    #[error("Invalid geocoding URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised while talking to the report source.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Network or HTTP-level failure.
    #[error("Report request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The request URL could not be built from the configured base URL.
    #[error("Invalid report URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The report payload was syntactically valid JSON but carried unusable values.
    #[error("Malformed report payload: {0}")]
    Malformed(String),
}

/// Errors raised by key/value store access.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Errors reported by a notification subscriber.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The transport refused or failed a (un)subscription.
    #[error("Topic {topic} rejected: {reason}")]
    Rejected { topic: String, reason: String },
}

/// Errors surfaced by a resolution.
///
/// Only failures that cannot be recovered locally end up here: missing
/// geocoding data, missing reports and unmatched names all degrade to
/// `None`/aggregate values instead.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Geocoder transport failure.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Report source transport failure.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Persisting the home location or settings failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The resolution did not finish within the configured budget.
    #[error("Resolution timed out after {0} seconds")]
    Timeout(u64),
}

/// Kinds of failures tallied during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Recovered locally
    GeocodeStatusNotOk,
    GeocodeNoProvince,
    ReportUnavailable,
    NameNotMatched,
    // Propagated
    GeocodeTransportError,
    ReportTransportError,
    ReportMalformed,
    StoreError,
    ResolutionTimeout,
}

impl ErrorType {
    /// Human-readable label used in the session summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::GeocodeStatusNotOk => "Geocode status not OK",
            ErrorType::GeocodeNoProvince => "Geocode result without province",
            ErrorType::ReportUnavailable => "No report within lookback",
            ErrorType::NameNotMatched => "Name not matched (aggregate used)",
            ErrorType::GeocodeTransportError => "Geocode transport error",
            ErrorType::ReportTransportError => "Report transport error",
            ErrorType::ReportMalformed => "Malformed report payload",
            ErrorType::StoreError => "Store error",
            ErrorType::ResolutionTimeout => "Resolution timeout",
        }
    }
}

impl From<&ResolveError> for ErrorType {
    fn from(error: &ResolveError) -> Self {
        match error {
            ResolveError::Geocode(_) => ErrorType::GeocodeTransportError,
            ResolveError::Report(ReportError::Malformed(_)) => ErrorType::ReportMalformed,
            ResolveError::Report(_) => ErrorType::ReportTransportError,
            ResolveError::Store(_) => ErrorType::StoreError,
            ResolveError::Timeout(_) => ErrorType::ResolutionTimeout,
        }
    }
}
