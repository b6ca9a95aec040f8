//! Topic identifiers for push-notification grouping.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::geocode::LocationHierarchy;

/// Characters left unencoded: the unreserved marks plus `!*'()`.
///
/// `'`, `(` and `)` are then stripped from the encoded segment.
const TOPIC_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const STRIPPED_CHARS: &[char] = &['\'', '(', ')'];

fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, TOPIC_SEGMENT)
        .to_string()
        .replace(STRIPPED_CHARS, "")
}

/// Builds a topic identifier from an ordered list of names.
///
/// Each name is percent-encoded, stripped of `'`, `(` and `)`, and the
/// segments are joined with `_`.
///
/// ```
/// use case_locator::notifications::generate_topic;
///
/// assert_eq!(generate_topic(&["US", "New York"]), "US_New%20York");
/// ```
pub fn generate_topic<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| encode_segment(name.as_ref()))
        .collect::<Vec<_>>()
        .join("_")
}

/// The state-wide and the resolved-location topic for a hierarchy.
///
/// Returns `None` when the country or state level is missing, since neither
/// topic can be formed without them.
pub fn topics_for_location(hierarchy: &LocationHierarchy) -> Option<[String; 2]> {
    let country = hierarchy.country_name()?;
    let state = hierarchy.state_name()?;

    let state_topic = generate_topic(&[country, state]);
    let local_topic = generate_topic(&[country, state, hierarchy.resolved_name.as_str()]);
    Some([state_topic, local_topic])
}
