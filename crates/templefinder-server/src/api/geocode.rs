use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use templefinder_upstream::GeocodedPlace;

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeParams {
    pub q: Option<String>,
}

pub(super) async fn geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodedPlace>, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing query"))?;

    match state.nominatim.geocode(query).await {
        Ok(Some(place)) => Ok(Json(place)),
        Ok(None) => {
            tracing::debug!(request_id = %req_id.0, query, "geocode found no match");
            Err(ApiError::not_found("No results"))
        }
        Err(e) => Err(map_upstream_error(
            &req_id,
            "nominatim",
            &e,
            "Geocoding failed",
        )),
    }
}
