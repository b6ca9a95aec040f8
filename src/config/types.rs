//! Configuration types.
//!
//! This module defines the library configuration struct and the enums shared
//! with the command-line parser.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_GEOCODING_BASE_URL, DEFAULT_LOOKBACK_DAYS, DEFAULT_REPORTS_BASE_URL,
    DEFAULT_STORE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RESOLUTION_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use case_locator::Config;
///
/// let config = Config {
///     geocoding_api_key: "my-key".to_string(),
///     lookback_days: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// API key appended to every geocoding request
    pub geocoding_api_key: String,

    /// Base URL of the geocoding web service
    pub geocoding_base_url: String,

    /// Base URL of the case report API
    pub reports_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Timeout for a whole resolution in seconds
    pub resolution_timeout_secs: u64,

    /// How many days before today the report fetcher may fall back to
    pub lookback_days: u32,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Path of the JSON key/value store used by the CLI
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_api_key: String::new(),
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            reports_base_url: DEFAULT_REPORTS_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            resolution_timeout_secs: RESOLUTION_TIMEOUT.as_secs(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}
