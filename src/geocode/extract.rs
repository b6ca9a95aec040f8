//! Location hierarchy extraction from geocoding results.

use super::types::{GeocodeResult, LocationHierarchy, LocationNode};
use crate::config::{TAG_CITY, TAG_COUNTRY, TAG_COUNTY, TAG_STATE};

/// Which name form of an address component a level uses.
#[derive(Clone, Copy)]
enum NameForm {
    Short,
    Long,
}

/// Builds a [`LocationHierarchy`] from an ordered set of geocoding results.
///
/// For each level, the first result tagged with the level's type is used, and
/// within it the first address component carrying the same tag. The country
/// level takes the short name ("US"), every other level the long name.
/// Missing results or components leave that level `None`.
pub fn extract_hierarchy(results: &[GeocodeResult]) -> LocationHierarchy {
    LocationHierarchy {
        country: extract_level(results, TAG_COUNTRY, NameForm::Short),
        state: extract_level(results, TAG_STATE, NameForm::Long),
        county: extract_level(results, TAG_COUNTY, NameForm::Long),
        city: extract_level(results, TAG_CITY, NameForm::Long),
        ..Default::default()
    }
}

fn extract_level(results: &[GeocodeResult], tag: &str, form: NameForm) -> Option<LocationNode> {
    let result = results.iter().find(|result| result.has_type(tag))?;
    let component = result
        .address_components
        .iter()
        .find(|component| component.has_type(tag))?;

    let name = match form {
        NameForm::Short => &component.short_name,
        NameForm::Long => &component.long_name,
    };

    Some(LocationNode {
        name: name.clone(),
        lat: result.geometry.location.lat,
        long: result.geometry.location.lng,
    })
}
