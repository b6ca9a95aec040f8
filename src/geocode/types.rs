//! Geocoding data structures.
//!
//! Wire types mirror the Google Geocoding JSON response; the hierarchy types
//! are what the rest of the crate works with.

use serde::{Deserialize, Serialize};

use crate::config::GEOCODE_STATUS_OK;

/// Full geocoding response: a status string plus candidate results.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// Whether the geocoder produced a usable answer.
    pub fn is_ok(&self) -> bool {
        self.status == GEOCODE_STATUS_OK
    }
}

/// One candidate address returned by a geocoding query.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
}

impl GeocodeResult {
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One resolved level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationNode {
    pub name: String,
    pub lat: f64,
    pub long: f64,
}

/// Country → state → county → city, each level optional.
///
/// `resolved_name`, `resolved_lat` and `resolved_long` stay empty/zero until a
/// report entity has been matched (see [`LocationHierarchy::resolve_to`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LocationHierarchy {
    pub country: Option<LocationNode>,
    pub state: Option<LocationNode>,
    pub county: Option<LocationNode>,
    pub city: Option<LocationNode>,
    #[serde(default)]
    pub resolved_name: String,
    #[serde(default)]
    pub resolved_lat: f64,
    #[serde(default)]
    pub resolved_long: f64,
}

impl LocationHierarchy {
    /// Name of the country level, if present.
    pub fn country_name(&self) -> Option<&str> {
        self.country.as_ref().map(|node| node.name.as_str())
    }

    /// Name of the state/province level, if present.
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|node| node.name.as_str())
    }

    /// True when no level could be extracted at all.
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.state.is_none() && self.county.is_none() && self.city.is_none()
    }

    /// Records the matched report entity as this hierarchy's resolved location.
    pub fn resolve_to(&mut self, name: &str, lat: f64, long: f64) {
        self.resolved_name = name.to_string();
        self.resolved_lat = lat;
        self.resolved_long = long;
    }
}

/// A map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// The four corners of the visible map area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRegion {
    pub far_left: Coordinate,
    pub far_right: Coordinate,
    pub near_left: Coordinate,
    pub near_right: Coordinate,
}

impl VisibleRegion {
    pub fn corners(&self) -> [Coordinate; 4] {
        [self.far_left, self.far_right, self.near_left, self.near_right]
    }
}
