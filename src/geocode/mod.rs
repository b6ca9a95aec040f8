//! Geocoding: service access and location hierarchy extraction.
//!
//! A reverse-geocoded coordinate comes back as a list of candidate addresses.
//! [`extract_hierarchy`] turns those into a country → state → county → city
//! [`LocationHierarchy`], leaving any level the geocoder did not return as `None`.

mod client;
mod extract;
mod types;

// Re-export public API
pub use client::{Geocoder, GoogleGeocoder};
pub use extract::extract_hierarchy;
pub use types::{
    AddressComponent, Coordinate, GeocodeResponse, GeocodeResult, Geometry, LatLng,
    LocationHierarchy, LocationNode, VisibleRegion,
};
