//! Temple search against an Overpass API interpreter.

use reqwest::{header, Client, Url};
use templefinder_core::{Coordinate, PlaceOfWorship, SearchRadius};

use crate::client::{build_http_client, join_url, read_json};
use crate::error::UpstreamError;
use crate::normalize::normalize_elements;
use crate::query::TempleQuery;
use crate::types::OverpassElement;

/// Client for `POST /api/interpreter`.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
}

impl OverpassClient {
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
            interpreter_url: join_url(base_url, "api/interpreter")?,
        })
    }

    /// Finds temples within `radius` of `center`, nearest first.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`OverpassClient::run_query`].
    pub async fn search_temples(
        &self,
        center: Coordinate,
        radius: SearchRadius,
    ) -> Result<Vec<PlaceOfWorship>, UpstreamError> {
        let query = TempleQuery::new(center, radius);
        let elements = self.run_query(&query).await?;
        let total = elements.len();
        let places = normalize_elements(center, elements);
        tracing::debug!(
            lat = center.lat,
            lon = center.lon,
            radius_m = query.radius_meters,
            elements = total,
            results = places.len(),
            "overpass temple search complete"
        );
        Ok(places)
    }

    /// Posts the query and returns the parsed `elements` array.
    ///
    /// A missing or non-array `elements` field yields an empty list; entries
    /// that do not parse as elements are skipped.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::UnexpectedStatus`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Deserialize`] if the body is not JSON.
    pub async fn run_query(
        &self,
        query: &TempleQuery,
    ) -> Result<Vec<OverpassElement>, UpstreamError> {
        let response = self
            .client
            .post(self.interpreter_url.clone())
            .header(header::CONTENT_TYPE, "text/plain; charset=UTF-8")
            .body(query.to_overpass_ql())
            .send()
            .await?;
        let body = read_json(response, "overpass interpreter").await?;

        let elements = body
            .get("elements")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        serde_json::from_value::<OverpassElement>(item.clone())
                            .inspect_err(|error| {
                                tracing::debug!(%error, "skipping unparseable overpass element");
                            })
                            .ok()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(elements)
    }
}
