//! The map a view controller drives: one session per controller, updated
//! imperatively whenever view state changes.

use std::fmt::Write as _;

use templefinder_core::{Coordinate, PlaceOfWorship};

/// Padding applied around result bounds when fitting the view.
pub const FIT_PADDING: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub coordinate: Coordinate,
    pub title: String,
    pub popup: String,
}

impl Marker {
    /// Popup reads `name`, then the religion badge (if tagged) and distance in km.
    #[must_use]
    pub fn from_place(place: &PlaceOfWorship) -> Self {
        let mut details = Vec::with_capacity(2);
        if let Some(religion) = place.religion() {
            details.push(format!("[{religion}]"));
        }
        if place.distance_meters.is_finite() {
            details.push(format!("{:.2} km", place.distance_km()));
        }

        Self {
            id: place.id.clone(),
            coordinate: place.coordinate,
            title: place.name.clone(),
            popup: format!("{}\n{}", place.name, details.join(" ")),
        }
    }
}

/// Search-radius circle drawn around the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub center: Coordinate,
    pub radius_meters: f64,
}

/// Lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    south: p.lat,
                    west: p.lon,
                    north: p.lat,
                    east: p.lon,
                },
                Some(b) => Self {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lon),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lon),
                },
            })
        })
    }

    /// Grows each side by `ratio` of the rectangle's height or width.
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let dy = (self.north - self.south).abs() * ratio;
        let dx = (self.east - self.west).abs() * ratio;
        Self {
            south: self.south - dy,
            west: self.west - dx,
            north: self.north + dy,
            east: self.east + dx,
        }
    }
}

pub trait MapSession {
    fn set_view(&mut self, center: Coordinate);
    fn set_markers(&mut self, markers: Vec<Marker>);
    fn set_overlay(&mut self, overlay: Option<Overlay>);
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Map session that keeps the latest state and renders it as text.
#[derive(Debug, Default)]
pub struct TerminalMap {
    pub view: Option<Coordinate>,
    pub markers: Vec<Marker>,
    pub overlay: Option<Overlay>,
    pub fitted: Option<Bounds>,
}

impl MapSession for TerminalMap {
    fn set_view(&mut self, center: Coordinate) {
        self.view = Some(center);
        self.fitted = None;
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn set_overlay(&mut self, overlay: Option<Overlay>) {
        self.overlay = overlay;
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted = Some(bounds);
    }
}

impl TerminalMap {
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(b) = self.fitted {
            let _ = writeln!(
                out,
                "map: fitted to [{:.4}, {:.4}] .. [{:.4}, {:.4}]",
                b.south, b.west, b.north, b.east
            );
        } else if let Some(c) = self.view {
            let _ = writeln!(out, "map: centered on {:.4}, {:.4}", c.lat, c.lon);
        }
        if let Some(o) = self.overlay {
            let _ = writeln!(
                out,
                "search radius: {:.1} km around {:.4}, {:.4}",
                o.radius_meters / 1000.0,
                o.center.lat,
                o.center.lon
            );
        }
        let _ = writeln!(out, "markers: {}", self.markers.len());
        for m in &self.markers {
            let _ = writeln!(
                out,
                "  {} [{}] @ {:.4}, {:.4}\n      {}",
                m.title,
                m.id,
                m.coordinate.lat,
                m.coordinate.lon,
                m.popup.replace('\n', " | ")
            );
        }
        out
    }
}
