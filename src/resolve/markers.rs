//! Marker placement data for report entities.
//!
//! Only coordinates and counts are produced here; drawing is left to the map.

use chrono::NaiveDate;
use serde::Serialize;

use crate::geocode::{LocationHierarchy, LocationNode};
use crate::reports::{is_unassigned, ReportEntity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub long: f64,
    pub title: String,
    pub confirmed: i64,
    pub date: NaiveDate,
    /// Whether the info window opens immediately (home marker only).
    pub show_info: bool,
}

impl MapMarker {
    /// Marker for one sub-region record.
    ///
    /// "Unassigned" records have no location of their own and are pinned to
    /// the province. Any other record without coordinates gets no marker.
    pub fn for_entity(entity: &ReportEntity, province: &LocationNode) -> Option<Self> {
        let (lat, long) = if is_unassigned(&entity.name) {
            (province.lat, province.long)
        } else {
            (entity.lat?, entity.long?)
        };

        Some(Self {
            lat,
            long,
            title: entity.name.clone(),
            confirmed: entity.confirmed,
            date: entity.date,
            show_info: false,
        })
    }

    /// Marker for the resolved home location, with its info window open.
    pub fn home(location: &LocationHierarchy, entity: &ReportEntity) -> Self {
        Self {
            lat: location.resolved_lat,
            long: location.resolved_long,
            title: location.resolved_name.clone(),
            confirmed: entity.confirmed,
            date: entity.date,
            show_info: true,
        }
    }
}

/// Markers for every placeable entity, skipping the one named `skip`.
pub fn markers_for_entities(
    entities: &[ReportEntity],
    province: &LocationNode,
    skip: Option<&str>,
) -> Vec<MapMarker> {
    entities
        .iter()
        .filter(|entity| skip != Some(entity.name.as_str()))
        .filter_map(|entity| {
            let marker = MapMarker::for_entity(entity, province);
            if marker.is_none() {
                log::debug!("No coordinates for {}; marker skipped", entity.name);
            }
            marker
        })
        .collect()
}
