mod geocode;
mod temples;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use templefinder_core::AppConfig;
use templefinder_upstream::{NominatimClient, OverpassClient, UpstreamError};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// Upstream clients shared by every handler. Cloning is cheap; each clone
/// reuses the same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub nominatim: NominatimClient,
    pub overpass: OverpassClient,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if either upstream URL is invalid or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            nominatim: NominatimClient::new(
                &config.nominatim_url,
                &config.user_agent,
                config.upstream_timeout_secs,
            )?,
            overpass: OverpassClient::new(
                &config.overpass_url,
                &config.user_agent,
                config.upstream_timeout_secs,
            )?,
        })
    }
}

/// Error response rendered as `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    code: &'static str,
    pub error: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(code: &'static str, message: &'static str) -> Self {
        Self {
            code,
            error: message,
        }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new("bad_request", message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_gateway(message: &'static str) -> Self {
        Self::new("bad_gateway", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) const UPSTREAM_ERROR: &str = "Upstream error";

/// Maps an upstream failure to a 502.
///
/// A non-success upstream status gets `status_message`; network and parse
/// failures get the generic [`UPSTREAM_ERROR`]. Both are logged with the
/// underlying cause.
pub(super) fn map_upstream_error(
    req_id: &RequestId,
    upstream: &'static str,
    error: &UpstreamError,
    status_message: &'static str,
) -> ApiError {
    if error.is_status_failure() {
        tracing::warn!(request_id = %req_id.0, upstream, error = %error, "upstream returned error status");
        ApiError::bad_gateway(status_message)
    } else {
        tracing::warn!(request_id = %req_id.0, upstream, error = %error, "upstream request failed");
        ApiError::bad_gateway(UPSTREAM_ERROR)
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/geocode", get(geocode::geocode))
        .route("/temples", get(temples::search_temples))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
