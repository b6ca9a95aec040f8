//! End-to-end resolutions built from the geocode, reports and tracker parts.
//!
//! This module provides:
//! - [`Resolver`] with the home, region and visible-region flows
//! - [`ReportSummary`] and [`MapMarker`], the data handed to the display layer

mod markers;
mod pipeline;
mod report;

// Re-export public API
pub use markers::{markers_for_entities, MapMarker};
pub use pipeline::{HomeResolution, RegionResolution, Resolver};
pub use report::ReportSummary;
