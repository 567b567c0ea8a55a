//! HTTP client for the Temple Finder server's `/geocode` and `/temples`.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use templefinder_core::{Coordinate, PlaceOfWorship, SearchRadius};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and, usually, an `error` message.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("invalid server URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Body of a successful `/geocode` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResponse {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct TemplesResponse {
    #[serde(default)]
    results: Vec<PlaceOfWorship>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// The two server calls the view controller depends on.
pub trait TempleApi {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse, ClientError>;

    async fn temples(
        &self,
        center: Coordinate,
        radius: SearchRadius,
    ) -> Result<Vec<PlaceOfWorship>, ClientError>;
}

/// [`TempleApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTempleApi {
    client: Client,
    base_url: Url,
}

impl HttpTempleApi {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("templefinder-cli/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

impl TempleApi for HttpTempleApi {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse, ClientError> {
        let url = self.endpoint("geocode", &[("q", query)])?;
        self.get_json(url).await
    }

    async fn temples(
        &self,
        center: Coordinate,
        radius: SearchRadius,
    ) -> Result<Vec<PlaceOfWorship>, ClientError> {
        let lat = center.lat.to_string();
        let lon = center.lon.to_string();
        let radius_km = radius.km().to_string();
        let url = self.endpoint(
            "temples",
            &[("lat", &lat), ("lon", &lon), ("radiusKm", &radius_km)],
        )?;
        let body: TemplesResponse = self.get_json(url).await?;
        Ok(body.results)
    }
}
