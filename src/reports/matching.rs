//! Matching report records to a location hierarchy.
//!
//! Geocoders say "Cook County" or "Orleans Parish" where report data says
//! "Cook" or "Orleans", so names are compared tolerantly: case and surrounding
//! whitespace are ignored, and the administrative suffix may be dropped.

use super::types::{ReportDataset, ReportEntity};
use crate::config::{ADMINISTRATIVE_SUFFIXES, UNASSIGNED_RECORD_NAME};
use crate::geocode::LocationHierarchy;

/// Which hierarchy level produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLevel {
    County,
    City,
    /// Nothing matched; the entity was synthesized from province totals.
    Aggregate,
}

/// The entity selected for a hierarchy, and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMatch {
    pub entity: ReportEntity,
    pub level: MatchLevel,
}

impl ReportMatch {
    pub fn is_aggregate(&self) -> bool {
        self.level == MatchLevel::Aggregate
    }
}

/// Tolerant comparison of a report record name against a geocoded name.
///
/// Both sides are upper-cased and trimmed. The match succeeds if the names are
/// equal, or if the record equals or contains the query with one
/// administrative suffix ("COUNTY", "PARISH") removed. A query that is empty
/// once stripped never matches.
pub fn names_match(record_name: &str, query: &str) -> bool {
    let record = record_name.trim().to_uppercase();
    let query = query.to_uppercase();

    if !query.trim().is_empty() && record == query.trim() {
        return true;
    }

    ADMINISTRATIVE_SUFFIXES.iter().any(|suffix| {
        let stripped = query.replacen(suffix, "", 1);
        let stripped = stripped.trim();
        !stripped.is_empty() && (record == stripped || record.contains(stripped))
    })
}

/// Whether a record is the catch-all "Unassigned" bucket.
pub fn is_unassigned(record_name: &str) -> bool {
    record_name.trim().eq_ignore_ascii_case(UNASSIGNED_RECORD_NAME)
}

fn find_entity<'a>(dataset: &'a ReportDataset, name: &str) -> Option<&'a ReportEntity> {
    dataset
        .entities
        .iter()
        .filter(|entity| !is_unassigned(&entity.name))
        .find(|entity| names_match(&entity.name, name))
}

/// Builds the province-wide entity used when no sub-record matches.
pub fn aggregate_entity(dataset: &ReportDataset) -> ReportEntity {
    let aggregate = &dataset.aggregate;
    ReportEntity {
        name: aggregate.province.clone(),
        date: aggregate.date,
        confirmed: aggregate.confirmed,
        deaths: aggregate.deaths,
        confirmed_diff: aggregate.confirmed_diff,
        deaths_diff: aggregate.deaths_diff,
        last_update: aggregate.last_update,
        lat: aggregate.lat,
        long: aggregate.long,
    }
}

/// Selects the single best report entity for a hierarchy.
///
/// County match first, then city match, then the synthesized province
/// aggregate. Always returns an entity.
pub fn match_report(dataset: &ReportDataset, hierarchy: &LocationHierarchy) -> ReportMatch {
    if let Some(county) = &hierarchy.county {
        if let Some(entity) = find_entity(dataset, &county.name) {
            return ReportMatch {
                entity: entity.clone(),
                level: MatchLevel::County,
            };
        }
    }

    if let Some(city) = &hierarchy.city {
        if let Some(entity) = find_entity(dataset, &city.name) {
            return ReportMatch {
                entity: entity.clone(),
                level: MatchLevel::City,
            };
        }
    }

    log::debug!(
        "No county/city record matched in {}; using province totals",
        dataset.aggregate.province
    );
    ReportMatch {
        entity: aggregate_entity(dataset),
        level: MatchLevel::Aggregate,
    }
}
