//! Case reports: source access, dated fallback fetching, and matching.
//!
//! This module provides:
//! - [`ReportSource`] and its HTTP implementation [`CovidApiSource`]
//! - [`ReportFetcher`], which steps back one day at a time while data is missing
//! - [`match_report`], which picks the county, city or province entity for a
//!   [`LocationHierarchy`](crate::geocode::LocationHierarchy)

mod client;
mod fetch;
mod matching;
mod types;

// Re-export public API
pub use client::{CovidApiSource, ReportSource};
pub use fetch::{lookback_boundary, ReportFetcher};
pub use matching::{aggregate_entity, is_unassigned, match_report, names_match, MatchLevel, ReportMatch};
pub use types::{
    AggregateReport, CityRecord, RegionInfo, RegionRecord, ReportDataset, ReportEntity,
    ReportResponse,
};
