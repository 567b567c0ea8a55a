//! Coordinates, search radii, and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_meters`].
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 point. Serialized as `{"lat": .., "lon": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// New Delhi; the client's starting view when nothing else is known.
    pub const NEW_DELHI: Self = Self {
        lat: 28.6139,
        lon: 77.2090,
    };

    /// Builds a coordinate, rejecting values outside `[-90, 90]` / `[-180, 180]`.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let coord = Self { lat, lon };
        coord.is_valid().then_some(coord)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_meters(*self, *other)
    }
}

/// Great-circle surface distance in meters between two points.
///
/// NaN components propagate to a NaN result.
#[must_use]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Search radius in kilometers, never below [`SearchRadius::MIN_KM`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SearchRadius(f64);

impl SearchRadius {
    pub const MIN_KM: f64 = 0.5;
    pub const DEFAULT_KM: f64 = 5.0;
    /// Largest radius the client lets a user pick. The server does not enforce it.
    pub const UI_MAX_KM: f64 = 50.0;

    /// Clamps `km` up to the minimum. Non-finite input yields the default.
    #[must_use]
    pub fn from_km(km: f64) -> Self {
        if km.is_finite() {
            Self(km.max(Self::MIN_KM))
        } else {
            Self::default()
        }
    }

    /// Like [`SearchRadius::from_km`] but also caps at [`SearchRadius::UI_MAX_KM`].
    #[must_use]
    pub fn clamp_to_ui(km: f64) -> Self {
        let radius = Self::from_km(km);
        Self(radius.0.min(Self::UI_MAX_KM))
    }

    #[must_use]
    pub fn km(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn meters(self) -> f64 {
        self.0 * 1000.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_KM)
    }
}
