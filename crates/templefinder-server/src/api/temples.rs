use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use templefinder_core::{Coordinate, PlaceOfWorship, SearchRadius};

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, AppState};

/// Raw query parameters. Kept as strings so unparseable numbers can be
/// treated as absent instead of failing extraction.
#[derive(Debug, Deserialize)]
pub(super) struct TempleParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TempleResults {
    pub results: Vec<PlaceOfWorship>,
}

fn parse_finite(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl TempleParams {
    fn center(&self) -> Result<Coordinate, ApiError> {
        let (Some(lat), Some(lon)) = (
            parse_finite(self.lat.as_deref()),
            parse_finite(self.lon.as_deref()),
        ) else {
            return Err(ApiError::bad_request("Missing lat/lon"));
        };
        Coordinate::new(lat, lon).ok_or_else(|| ApiError::bad_request("Invalid lat/lon"))
    }

    fn radius(&self) -> SearchRadius {
        parse_finite(self.radius_km.as_deref()).map_or_else(SearchRadius::default, SearchRadius::from_km)
    }
}

pub(super) async fn search_temples(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<TempleParams>,
) -> Result<Json<TempleResults>, ApiError> {
    let center = params.center()?;
    let radius = params.radius();

    let results = state
        .overpass
        .search_temples(center, radius)
        .await
        .map_err(|e| map_upstream_error(&req_id, "overpass", &e, "Overpass error"))?;

    tracing::info!(
        request_id = %req_id.0,
        lat = center.lat,
        lon = center.lon,
        radius_km = radius.km(),
        count = results.len(),
        "temple search served"
    );

    Ok(Json(TempleResults { results }))
}
