//! Overpass QL query describing "temple-like" features around a point.
//!
//! A feature matches when any one [`TEMPLE_PREDICATES`] entry matches all of
//! its tag filters. Each predicate is issued once per [`ElementKind`], so the
//! rendered query carries twelve statements sharing the same `around` clause.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use templefinder_core::{Coordinate, SearchRadius};

/// Religions whose places of worship count as temples.
pub const TEMPLE_RELIGIONS: &[&str] = &["hindu", "buddhist", "jain", "sikh", "shinto"];

/// Server-side time budget passed to Overpass in the query header.
pub const QUERY_TIMEOUT_SECS: u32 = 25;

/// Maximum number of elements Overpass returns.
pub const RESULT_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub const ALL: [Self; 3] = [Self::Node, Self::Way, Self::Relation];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

/// One bracketed tag condition of an Overpass statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    /// `["key"="value"]`, exact and case-sensitive.
    Equals {
        key: &'static str,
        value: &'static str,
    },
    /// `["key"~"^(a|b|c)$", i]`: whole value equals one of `values`, ignoring ASCII case.
    OneOfIgnoreCase {
        key: &'static str,
        values: &'static [&'static str],
    },
    /// `["key"~"needle", i]`: value contains `needle`, ignoring ASCII case.
    ContainsIgnoreCase {
        key: &'static str,
        needle: &'static str,
    },
}

const PLACE_OF_WORSHIP: TagFilter = TagFilter::Equals {
    key: "amenity",
    value: "place_of_worship",
};

/// The four alternatives that define a temple. Order matters only for the
/// rendered query text.
pub const TEMPLE_PREDICATES: [&[TagFilter]; 4] = [
    &[
        PLACE_OF_WORSHIP,
        TagFilter::OneOfIgnoreCase {
            key: "religion",
            values: TEMPLE_RELIGIONS,
        },
    ],
    &[TagFilter::Equals {
        key: "historic",
        value: "temple",
    }],
    &[TagFilter::Equals {
        key: "building",
        value: "temple",
    }],
    &[
        TagFilter::ContainsIgnoreCase {
            key: "name",
            needle: "temple",
        },
        PLACE_OF_WORSHIP,
    ],
];

impl TagFilter {
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Equals { key, .. }
            | Self::OneOfIgnoreCase { key, .. }
            | Self::ContainsIgnoreCase { key, .. } => key,
        }
    }

    /// Evaluates the filter against a tag map the way Overpass would.
    #[must_use]
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        let Some(actual) = tags.get(self.key()) else {
            return false;
        };
        match self {
            Self::Equals { value, .. } => actual == value,
            Self::OneOfIgnoreCase { values, .. } => {
                values.iter().any(|v| v.eq_ignore_ascii_case(actual))
            }
            Self::ContainsIgnoreCase { needle, .. } => actual
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }

    fn render(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            Self::Equals { key, value } => write!(out, "[\"{key}\"=\"{value}\"]"),
            Self::OneOfIgnoreCase { key, values } => {
                write!(out, "[\"{key}\"~\"^({})$\", i]", values.join("|"))
            }
            Self::ContainsIgnoreCase { key, needle } => write!(out, "[\"{key}\"~\"{needle}\", i]"),
        };
    }
}

/// A temple search around `center` within `radius_meters`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempleQuery {
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl TempleQuery {
    #[must_use]
    pub fn new(center: Coordinate, radius: SearchRadius) -> Self {
        Self {
            center,
            radius_meters: radius.meters(),
        }
    }

    /// The shared `(around:R,LAT,LON)` spatial clause.
    #[must_use]
    pub fn around_clause(&self) -> String {
        format!(
            "(around:{},{},{})",
            self.radius_meters, self.center.lat, self.center.lon
        )
    }

    /// One statement per predicate and element kind, predicate-major.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        let around = self.around_clause();
        let mut statements = Vec::with_capacity(TEMPLE_PREDICATES.len() * ElementKind::ALL.len());
        for filters in TEMPLE_PREDICATES {
            for kind in ElementKind::ALL {
                let mut stmt = String::from(kind.as_str());
                for filter in filters {
                    filter.render(&mut stmt);
                }
                stmt.push_str(&around);
                stmt.push(';');
                statements.push(stmt);
            }
        }
        statements
    }

    /// Full Overpass QL text, ready to POST to `/api/interpreter`.
    #[must_use]
    pub fn to_overpass_ql(&self) -> String {
        let mut ql = format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n");
        for stmt in self.statements() {
            ql.push_str("  ");
            ql.push_str(&stmt);
            ql.push('\n');
        }
        let _ = writeln!(ql, ");\nout center {RESULT_LIMIT};");
        ql
    }

    /// Whether a feature with these tags satisfies any temple predicate.
    #[must_use]
    pub fn matches(tags: &BTreeMap<String, String>) -> bool {
        TEMPLE_PREDICATES
            .iter()
            .any(|filters| filters.iter().all(|f| f.matches(tags)))
    }
}
