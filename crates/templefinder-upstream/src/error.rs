use thiserror::Error;

/// Errors returned by the Nominatim and Overpass clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered, but with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl UpstreamError {
    /// `true` when the upstream responded with a non-success status, as
    /// opposed to the request never completing or the body being unreadable.
    #[must_use]
    pub fn is_status_failure(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. })
    }
}
