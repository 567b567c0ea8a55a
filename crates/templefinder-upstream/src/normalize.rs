//! Conversion of raw Overpass elements into [`PlaceOfWorship`] records.

use std::collections::BTreeMap;

use templefinder_core::{sort_by_distance, Coordinate, PlaceOfWorship};

use crate::types::OverpassElement;

/// Label used when an element carries none of the name tags.
pub const FALLBACK_NAME: &str = "Temple";

const NAME_TAGS: [&str; 3] = ["name", "name:en", "alt_name"];

/// Picks the first non-empty of `name`, `name:en`, `alt_name`, else [`FALLBACK_NAME`].
#[must_use]
pub fn display_name(tags: &BTreeMap<String, String>) -> String {
    NAME_TAGS
        .iter()
        .filter_map(|key| tags.get(*key))
        .find(|value| !value.is_empty())
        .map_or_else(|| FALLBACK_NAME.to_string(), Clone::clone)
}

/// Nodes use their own position; ways and relations use the `out center`
/// point. Nodes lacking a position fall back to a center if one is present.
#[must_use]
pub fn element_coordinate(element: &OverpassElement) -> Option<Coordinate> {
    let direct = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) if element.kind == "node" => Some(Coordinate { lat, lon }),
        _ => None,
    };
    direct.or_else(|| {
        element.center.map(|c| Coordinate {
            lat: c.lat,
            lon: c.lon,
        })
    })
}

/// Maps one element, or `None` when it has no usable position.
#[must_use]
pub fn normalize_element(center: Coordinate, element: OverpassElement) -> Option<PlaceOfWorship> {
    let Some(coordinate) = element_coordinate(&element) else {
        tracing::debug!(
            kind = %element.kind,
            id = element.id,
            "dropping overpass element without coordinates"
        );
        return None;
    };

    Some(PlaceOfWorship {
        id: format!("{}/{}", element.kind, element.id),
        name: display_name(&element.tags),
        distance_meters: center.distance_to(&coordinate),
        coordinate,
        tags: element.tags,
    })
}

/// Normalizes every element and returns them nearest-first.
#[must_use]
pub fn normalize_elements(
    center: Coordinate,
    elements: impl IntoIterator<Item = OverpassElement>,
) -> Vec<PlaceOfWorship> {
    let mut places: Vec<PlaceOfWorship> = elements
        .into_iter()
        .filter_map(|el| normalize_element(center, el))
        .collect();
    sort_by_distance(&mut places);
    places
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
