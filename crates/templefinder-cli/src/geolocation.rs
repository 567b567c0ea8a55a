use templefinder_core::Coordinate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("location access denied")]
    Denied,
}

/// Source of the device's current position.
pub trait Geolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// A position supplied up front (e.g. from command-line flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(Result<Coordinate, GeolocationError>);

impl FixedLocation {
    #[must_use]
    pub fn at(coordinate: Coordinate) -> Self {
        Self(Ok(coordinate))
    }

    #[must_use]
    pub fn unsupported() -> Self {
        Self(Err(GeolocationError::Unsupported))
    }

    #[cfg(test)]
    pub fn denied() -> Self {
        Self(Err(GeolocationError::Denied))
    }
}

impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0
    }
}
