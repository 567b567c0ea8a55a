//! Forward geocoding against a Nominatim-compatible `/search` endpoint.

use reqwest::{header, Client, Url};
use serde::Serialize;
use templefinder_core::Coordinate;

use crate::client::{build_http_client, join_url, read_json};
use crate::error::UpstreamError;
use crate::types::NominatimPlace;

/// Best match for a free-text place query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPlace {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// Client for Nominatim's `format=json` search.
///
/// Use [`NominatimClient::new`] with the public instance URL or point it at a
/// mock server in tests.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    search_url: Url,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_http_client(user_agent, timeout_secs)?,
            search_url: join_url(base_url, "search")?,
        })
    }

    /// Looks up `query` and returns the single best match, or `None` when the
    /// geocoder found nothing.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::UnexpectedStatus`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Deserialize`] if the body or the first candidate is malformed.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>, UpstreamError> {
        let url = self.build_url(query);
        tracing::debug!(query, "geocoding via nominatim");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let body = read_json(response, "nominatim search").await?;

        // Anything other than an array is treated as "no match".
        let Some(first) = body.as_array().and_then(|items| items.first()) else {
            return Ok(None);
        };

        let place: NominatimPlace =
            serde_json::from_value(first.clone()).map_err(|e| UpstreamError::Deserialize {
                context: format!("nominatim search(q={query})"),
                source: e,
            })?;

        Ok(Some(GeocodedPlace {
            coordinate: Coordinate {
                lat: place.lat,
                lon: place.lon,
            },
            display_name: place.display_name,
        }))
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("limit", "1");
        url
    }
}
