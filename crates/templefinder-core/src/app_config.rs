use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the Nominatim-compatible geocoder.
    pub nominatim_url: String,
    /// Base URL of the Overpass API instance; `/api/interpreter` is appended.
    pub overpass_url: String,
    /// Sent on every upstream request; public OSM services require one.
    pub user_agent: String,
    /// Local HTTP timeout for upstream calls. `None` leaves it to the upstream.
    pub upstream_timeout_secs: Option<u64>,
}
