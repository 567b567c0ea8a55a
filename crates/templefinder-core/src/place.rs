use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// One temple-like feature returned by a search, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOfWorship {
    /// `"<element-type>/<numeric-id>"`, e.g. `"way/123"`.
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Raw upstream tags, unfiltered.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub distance_meters: f64,
}

impl PlaceOfWorship {
    #[must_use]
    pub fn religion(&self) -> Option<&str> {
        self.tags.get("religion").map(String::as_str)
    }

    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// Sorts ascending by distance. Stable, so equal distances keep input order;
/// NaN distances are treated as infinitely far.
pub fn sort_by_distance(places: &mut [PlaceOfWorship]) {
    fn key(place: &PlaceOfWorship) -> f64 {
        if place.distance_meters.is_nan() {
            f64::INFINITY
        } else {
            place.distance_meters
        }
    }
    places.sort_by(|a, b| key(a).total_cmp(&key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, distance_meters: f64) -> PlaceOfWorship {
        PlaceOfWorship {
            id: id.to_string(),
            name: "Temple".to_string(),
            coordinate: Coordinate { lat: 0.0, lon: 0.0 },
            tags: BTreeMap::new(),
            distance_meters,
        }
    }

    fn ids(places: &[PlaceOfWorship]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn sorts_ascending() {
        let mut places = vec![place("a", 300.0), place("b", 10.0), place("c", 120.5)];
        sort_by_distance(&mut places);
        assert_eq!(ids(&places), ["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut places = vec![place("x", 50.0), place("y", 5.0), place("z", 50.0)];
        sort_by_distance(&mut places);
        assert_eq!(ids(&places), ["y", "x", "z"]);
    }

    #[test]
    fn nan_distance_sorts_last() {
        let mut places = vec![place("nan", f64::NAN), place("far", 9_000.0), place("near", 1.0)];
        sort_by_distance(&mut places);
        assert_eq!(ids(&places), ["near", "far", "nan"]);
    }

    #[test]
    fn serializes_with_flat_coordinate_and_camel_case() {
        let mut p = place("node/42", 1234.5);
        p.coordinate = Coordinate {
            lat: 28.61,
            lon: 77.21,
        };
        p.tags.insert("religion".to_string(), "hindu".to_string());

        let json = serde_json::to_value(&p).expect("serialize");
        assert_eq!(json["id"], "node/42");
        assert_eq!(json["lat"].as_f64(), Some(28.61));
        assert_eq!(json["lon"].as_f64(), Some(77.21));
        assert_eq!(json["distanceMeters"].as_f64(), Some(1234.5));
        assert_eq!(json["tags"]["religion"], "hindu");
        assert!(json.get("coordinate").is_none());
    }

    #[test]
    fn religion_reads_tag() {
        let mut p = place("node/1", 0.0);
        assert_eq!(p.religion(), None);
        p.tags.insert("religion".to_string(), "jain".to_string());
        assert_eq!(p.religion(), Some("jain"));
        assert!((place("n", 2_500.0).distance_km() - 2.5).abs() < f64::EPSILON);
    }
}
