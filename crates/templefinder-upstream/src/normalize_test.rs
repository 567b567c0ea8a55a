use super::*;
use crate::types::ElementCenter;

// -----------------------------------------------------------------------
// fixtures
// -----------------------------------------------------------------------

fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn node(id: i64, lat: f64, lon: f64) -> OverpassElement {
    OverpassElement {
        kind: "node".to_owned(),
        id,
        lat: Some(lat),
        lon: Some(lon),
        center: None,
        tags: BTreeMap::new(),
    }
}

fn way(id: i64, center: Option<(f64, f64)>) -> OverpassElement {
    OverpassElement {
        kind: "way".to_owned(),
        id,
        lat: None,
        lon: None,
        center: center.map(|(lat, lon)| ElementCenter { lat, lon }),
        tags: BTreeMap::new(),
    }
}

const ORIGIN: Coordinate = Coordinate { lat: 0.0, lon: 0.0 };

// -----------------------------------------------------------------------
// display_name
// -----------------------------------------------------------------------

#[test]
fn display_name_prefers_primary_name() {
    let t = tags(&[("name", "A"), ("name:en", "B")]);
    assert_eq!(display_name(&t), "A");
}

#[test]
fn display_name_falls_back_to_english_name() {
    let t = tags(&[("name:en", "B")]);
    assert_eq!(display_name(&t), "B");
}

#[test]
fn display_name_falls_back_to_alt_name() {
    let t = tags(&[("alt_name", "Old Shrine"), ("religion", "shinto")]);
    assert_eq!(display_name(&t), "Old Shrine");
}

#[test]
fn display_name_defaults_to_temple() {
    assert_eq!(display_name(&BTreeMap::new()), "Temple");
    assert_eq!(display_name(&tags(&[("religion", "jain")])), "Temple");
}

#[test]
fn display_name_skips_empty_values() {
    let t = tags(&[("name", ""), ("name:en", "Lotus Temple")]);
    assert_eq!(display_name(&t), "Lotus Temple");
}

// -----------------------------------------------------------------------
// element_coordinate / normalize_element
// -----------------------------------------------------------------------

#[test]
fn node_uses_direct_coordinates() {
    let c = element_coordinate(&node(1, 28.5, 77.1)).expect("coordinate");
    assert!((c.lat - 28.5).abs() < f64::EPSILON);
    assert!((c.lon - 77.1).abs() < f64::EPSILON);
}

#[test]
fn way_uses_center() {
    let c = element_coordinate(&way(2, Some((10.0, 20.0)))).expect("coordinate");
    assert!((c.lat - 10.0).abs() < f64::EPSILON);
    assert!((c.lon - 20.0).abs() < f64::EPSILON);
}

#[test]
fn way_without_center_is_dropped() {
    assert!(normalize_element(ORIGIN, way(3, None)).is_none());
}

#[test]
fn node_missing_longitude_is_dropped() {
    let mut el = node(4, 1.0, 1.0);
    el.lon = None;
    assert!(normalize_element(ORIGIN, el).is_none());
}

#[test]
fn relation_ignores_stray_direct_coordinates() {
    let el = OverpassElement {
        kind: "relation".to_owned(),
        id: 5,
        lat: Some(50.0),
        lon: Some(50.0),
        center: Some(ElementCenter { lat: 1.0, lon: 1.0 }),
        tags: BTreeMap::new(),
    };
    let c = element_coordinate(&el).expect("coordinate");
    assert!((c.lat - 1.0).abs() < f64::EPSILON);
}

#[test]
fn normalize_element_builds_id_and_keeps_tags() {
    let mut el = way(987_654, Some((0.0, 1.0)));
    el.tags = tags(&[("name", "Wat Pho"), ("religion", "buddhist")]);

    let place = normalize_element(ORIGIN, el).expect("place");
    assert_eq!(place.id, "way/987654");
    assert_eq!(place.name, "Wat Pho");
    assert_eq!(place.religion(), Some("buddhist"));
    assert_eq!(place.tags.len(), 2);
    assert!((place.distance_meters - 111_194.93).abs() < 0.5);
}

// -----------------------------------------------------------------------
// normalize_elements
// -----------------------------------------------------------------------

#[test]
fn normalize_elements_drops_unlocated_and_sorts() {
    let elements = vec![
        node(1, 0.0, 0.3),
        way(2, None),
        way(3, Some((0.0, 0.1))),
        node(4, 0.0, 0.2),
    ];
    let places = normalize_elements(ORIGIN, elements);

    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["way/3", "node/4", "node/1"]);
    assert!(places
        .windows(2)
        .all(|w| w[0].distance_meters <= w[1].distance_meters));
    assert!(places
        .iter()
        .all(|p| p.coordinate.lat.is_finite() && p.coordinate.lon.is_finite()));
}

#[test]
fn normalize_elements_empty_input() {
    assert!(normalize_elements(ORIGIN, Vec::new()).is_empty());
}
