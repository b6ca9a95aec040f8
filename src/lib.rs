//! case_locator library: location resolution and case report association
//!
//! This library turns a coordinate into a country → state → county → city
//! hierarchy, fetches the most recent case report for that state (stepping
//! back a day at a time while data is not yet published), and picks the
//! report entity that best matches the hierarchy. It also derives the
//! notification topics for a location and keeps track of which states were
//! already resolved in the session.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use case_locator::geocode::GoogleGeocoder;
//! use case_locator::initialization::init_client;
//! use case_locator::reports::CovidApiSource;
//! use case_locator::resolve::Resolver;
//! use case_locator::storage::MemoryStore;
//! use case_locator::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     geocoding_api_key: "my-key".to_string(),
//!     ..Default::default()
//! };
//! let client = init_client(&config)?;
//! let resolver = Resolver::new(
//!     Arc::new(GoogleGeocoder::new(
//!         client.clone(),
//!         &config.geocoding_base_url,
//!         config.geocoding_api_key.clone(),
//!     )),
//!     Arc::new(CovidApiSource::new(client, &config.reports_base_url)),
//!     &config,
//! );
//!
//! let store = MemoryStore::new();
//! if let Some(home) = resolver.resolve_home(41.8781, -87.6298, &store, |_, _| true).await? {
//!     println!("{}: {} confirmed", home.location.resolved_name, home.summary.confirmed);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod geocode;
pub mod initialization;
pub mod notifications;
pub mod reports;
pub mod resolve;
pub mod storage;
pub mod tracker;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::ResolveError;
pub use geocode::{extract_hierarchy, LocationHierarchy, LocationNode};
pub use notifications::generate_topic;
pub use reports::{match_report, names_match, ReportFetcher};
pub use resolve::{HomeResolution, RegionResolution, Resolver};
pub use tracker::SeenRegionTracker;
