//! Configuration constants.
//!
//! This module defines the defaults and fixed parameters used throughout the
//! crate: remote endpoints, timeouts, retry policy, lookback bounds and the
//! address/store keys shared with the outside world.

use std::time::Duration;

// Remote endpoints
/// Base URL of the Google Maps web services (geocoding lives under `/geocode/json`)
pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
/// Base URL of the case report API (reports live under `/reports`)
pub const DEFAULT_REPORTS_BASE_URL: &str = "https://covid-api.com/api";
/// Environment variable holding the geocoding API key
pub const GEOCODING_API_KEY_ENV: &str = "GEOCODING_API_KEY";

/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("case_locator/", env!("CARGO_PKG_VERSION"));

// Timeouts
/// Per-request HTTP timeout in seconds.
/// Resolutions are triggered from interactive map panning, so keep this short.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Timeout for one whole resolution (geocode + report fallback + match)
pub const RESOLUTION_TIMEOUT: Duration = Duration::from_secs(10);

// Report lookback
/// Default number of days the report fetcher may step back from the requested date
pub const DEFAULT_LOOKBACK_DAYS: u32 = 1;
/// Hard cap on fallback iterations, whatever boundary the caller passes
pub const MAX_LOOKBACK_DAYS: u32 = 31;
/// Date format used by the report API (`date` query parameter and record dates)
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Timestamp format used by the report API `last_update` field
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Retry strategy (transport failures only; empty data is handled by the lookback)
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 200;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 2;
/// Maximum retry attempts after the initial request
pub const RETRY_MAX_ATTEMPTS: usize = 2;

/// HTTP 429 Too Many Requests
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

// Geocoding
/// Status string the geocoder returns for a usable response
pub const GEOCODE_STATUS_OK: &str = "OK";
/// Address type tag for the country level
pub const TAG_COUNTRY: &str = "country";
/// Address type tag for the state/province level
pub const TAG_STATE: &str = "administrative_area_level_1";
/// Address type tag for the county level
pub const TAG_COUNTY: &str = "administrative_area_level_2";
/// Address type tag for the city level
pub const TAG_CITY: &str = "locality";

// Report matching
/// Sub-records with this name are never matched; they sit at the province centre
pub const UNASSIGNED_RECORD_NAME: &str = "UNASSIGNED";
/// Administrative suffixes the report data tends to drop
pub const ADMINISTRATIVE_SUFFIXES: &[&str] = &["COUNTY", "PARISH"];

// Key/value store keys
pub const HOME_LOCATION_KEY: &str = "location";
pub const USER_SETTINGS_KEY: &str = "userSettings";
pub const SUBSCRIBED_TOPICS_KEY: &str = "subscribedTopics";
/// Default path of the JSON store used by the CLI
pub const DEFAULT_STORE_PATH: &str = "./case_locator.json";
