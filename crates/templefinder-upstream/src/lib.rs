//! Clients for the public geodata services behind Temple Finder: Nominatim
//! for forward geocoding and Overpass for the spatial temple search.

mod client;
pub mod error;
pub mod nominatim;
pub mod normalize;
pub mod overpass;
pub mod query;
pub mod types;

pub use error::UpstreamError;
pub use nominatim::{GeocodedPlace, NominatimClient};
pub use normalize::{display_name, normalize_elements};
pub use overpass::OverpassClient;
pub use query::TempleQuery;
