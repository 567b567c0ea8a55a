//! Shared HTTP plumbing for the upstream clients.

use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::UpstreamError;

/// Builds the `reqwest::Client` used for one upstream.
///
/// Every request carries `user_agent`; public OSM services reject anonymous
/// clients. No overall timeout is set unless `timeout_secs` is given.
pub(crate) fn build_http_client(
    user_agent: &str,
    timeout_secs: Option<u64>,
) -> Result<Client, UpstreamError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Parses `base_url` and appends `path`, tolerating any number of trailing
/// slashes on the base.
pub(crate) fn join_url(base_url: &str, path: &str) -> Result<Url, UpstreamError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Rejects non-2xx responses and parses the body as JSON.
pub(crate) async fn read_json(
    response: Response,
    context: &str,
) -> Result<serde_json::Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_strips_trailing_slashes() {
        let url = join_url("https://overpass-api.de//", "/api/interpreter").unwrap();
        assert_eq!(url.as_str(), "https://overpass-api.de/api/interpreter");
    }

    #[test]
    fn join_url_keeps_base_path() {
        let url = join_url("http://localhost:9000/nominatim", "search").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/nominatim/search");
    }

    #[test]
    fn join_url_rejects_garbage() {
        let err = join_url("not a url", "search").unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBaseUrl { .. }));
    }
}
