//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_GEOCODING_BASE_URL, DEFAULT_LOOKBACK_DAYS, DEFAULT_REPORTS_BASE_URL,
    DEFAULT_STORE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_LOOKBACK_DAYS,
    RESOLUTION_TIMEOUT,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Resolve and store the home location
/// case_locator home 41.8781 -87.6298
///
/// # Resolve a coordinate without touching the stored home
/// case_locator --lookback-days 3 region 29.95 -90.07
///
/// # Print the topic for a list of names
/// case_locator topic US "New York"
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "case_locator",
    about = "Resolves a position into its region hierarchy and matching case report."
)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// JSON file holding the home location, settings and topics
    #[arg(long, value_parser, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout for a whole resolution in seconds
    #[arg(long, default_value_t = RESOLUTION_TIMEOUT.as_secs())]
    pub resolution_timeout_secs: u64,

    /// Days before today the report lookup may fall back to (at most 31)
    #[arg(
        long,
        default_value_t = DEFAULT_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_LOOKBACK_DAYS))
    )]
    pub lookback_days: u32,

    /// Geocoding service base URL
    #[arg(long, default_value = DEFAULT_GEOCODING_BASE_URL)]
    pub geocoding_base_url: String,

    /// Case report API base URL
    #[arg(long, default_value = DEFAULT_REPORTS_BASE_URL)]
    pub reports_base_url: String,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Resolve the home location, store it and subscribe to its topics
    Home {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        long: f64,
    },
    /// Resolve a coordinate and print the matched report entity
    Region {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        long: f64,
    },
    /// Print the notification topic for a list of names
    Topic {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Opt {
    /// Library configuration for these options; the API key is supplied separately.
    pub fn to_config(&self, geocoding_api_key: impl Into<String>) -> Config {
        Config {
            geocoding_api_key: geocoding_api_key.into(),
            geocoding_base_url: self.geocoding_base_url.clone(),
            reports_base_url: self.reports_base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            resolution_timeout_secs: self.resolution_timeout_secs,
            lookback_days: self.lookback_days,
            user_agent: self.user_agent.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            store_path: self.store_path.clone(),
        }
    }
}
