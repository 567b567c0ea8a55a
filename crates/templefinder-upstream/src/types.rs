//! Wire types for the Nominatim and Overpass JSON APIs.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Nominatim /search
// ---------------------------------------------------------------------------

/// One candidate from Nominatim's `format=json` search output.
///
/// Nominatim encodes `lat`/`lon` as decimal strings; plain numbers are
/// accepted too so compatible geocoders work.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: String,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Overpass interpreter
// ---------------------------------------------------------------------------

/// Center point Overpass attaches to ways and relations under `out center`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

/// A single entry of the Overpass `elements` array.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    /// `node`, `way`, or `relation`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}
