pub mod app_config;
pub mod config;
pub mod geo;
pub mod place;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_meters, Coordinate, SearchRadius, EARTH_RADIUS_METERS};
pub use place::{sort_by_distance, PlaceOfWorship};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
