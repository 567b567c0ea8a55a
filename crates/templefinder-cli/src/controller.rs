//! Client view controller.
//!
//! Owns the view state (query text, map center, radius, results, loading and
//! error banner) and the map session. Every trigger (search submission, "use
//! my location", initial mount) issues a [`SearchTicket`]; a completion is
//! applied only if its ticket is still the latest one.
//!
//! The async triggers borrow the controller mutably until they finish, so they
//! never overlap one another. The ticket matters for callers that drive
//! [`ViewController::begin_search`] and [`ViewController::finish_search`]
//! themselves, e.g. an event loop that spawns fetches and applies their
//! results as they arrive: a slow response then cannot overwrite a newer one.

use templefinder_core::{Coordinate, PlaceOfWorship, SearchRadius};

use crate::api_client::{ClientError, TempleApi};
use crate::geolocation::{GeolocationError, Geolocator};
use crate::map_session::{Bounds, MapSession, Marker, Overlay, FIT_PADDING};

pub const GEOCODE_FAILED: &str = "Could not find that place";
pub const FETCH_FAILED: &str = "Failed to fetch temple data";
pub const LOCATION_DENIED: &str = "Location access denied";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientViewState {
    pub query: String,
    pub center: Coordinate,
    pub radius: SearchRadius,
    /// Nearest first. Replaced wholesale on every successful search.
    pub results: Vec<PlaceOfWorship>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ClientViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            center: Coordinate::NEW_DELHI,
            radius: SearchRadius::default(),
            results: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Error,
}

/// Generation number of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

pub struct ViewController<A, G, M> {
    api: A,
    geolocator: G,
    map: M,
    state: ClientViewState,
    latest: u64,
}

impl<A, G, M> ViewController<A, G, M>
where
    A: TempleApi,
    G: Geolocator,
    M: MapSession,
{
    /// Creates the controller and pushes the initial view to `map`.
    pub fn new(api: A, geolocator: G, map: M) -> Self {
        let mut controller = Self {
            api,
            geolocator,
            map,
            state: ClientViewState::default(),
            latest: 0,
        };
        controller.sync_view();
        controller
    }

    pub fn state(&self) -> &ClientViewState {
        &self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn phase(&self) -> Phase {
        if self.state.loading {
            Phase::Searching
        } else if self.state.error.is_some() {
            Phase::Error
        } else {
            Phase::Idle
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Clamps to the UI range and redraws the radius overlay. Does not search.
    pub fn set_radius_km(&mut self, km: f64) {
        self.state.radius = SearchRadius::clamp_to_ui(km);
        self.sync_view();
    }

    /// Recenters on the result at `index` without re-querying.
    pub fn select_result(&mut self, index: usize) -> Option<Coordinate> {
        let coordinate = self.state.results.get(index)?.coordinate;
        self.recenter(coordinate);
        Some(coordinate)
    }

    /// Initial load: search around the current (default) center.
    pub async fn mount(&mut self) {
        let ticket = self.begin_search();
        self.fetch_temples(ticket, self.state.center).await;
    }

    /// Geocodes the query text and searches there; an empty query searches
    /// the current center.
    pub async fn submit_search(&mut self) {
        let query = self.state.query.trim().to_owned();
        let ticket = self.begin_search();
        if query.is_empty() {
            self.fetch_temples(ticket, self.state.center).await;
            return;
        }

        match self.api.geocode(&query).await {
            Ok(place) => {
                tracing::debug!(query, display_name = %place.display_name, "geocoded search query");
                self.recenter(place.coordinate);
                self.fetch_temples(ticket, place.coordinate).await;
            }
            Err(error) => {
                tracing::warn!(query, %error, "geocoding failed");
                self.fail(ticket, GEOCODE_FAILED);
            }
        }
    }

    /// Searches around the device position.
    pub async fn use_my_location(&mut self) {
        let ticket = self.begin_search();
        match self.geolocator.current_position().await {
            Ok(position) => {
                self.recenter(position);
                self.fetch_temples(ticket, position).await;
            }
            Err(GeolocationError::Unsupported) => self.fail(ticket, GEOLOCATION_UNSUPPORTED),
            Err(GeolocationError::Denied) => self.fail(ticket, LOCATION_DENIED),
        }
    }

    /// Starts a new generation, superseding any search still in flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest += 1;
        self.state.loading = true;
        self.state.error = None;
        SearchTicket(self.latest)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Applies a temple search outcome if `ticket` is still current.
    ///
    /// On failure the previous results stay in place. Returns whether the
    /// outcome was applied.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<PlaceOfWorship>, ClientError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale search result"
            );
            return false;
        }

        self.state.loading = false;
        match outcome {
            Ok(results) => {
                self.state.results = results;
                self.sync_markers();
            }
            Err(error) => {
                tracing::warn!(%error, "temple search failed");
                self.state.error = Some(FETCH_FAILED.to_string());
            }
        }
        true
    }

    async fn fetch_temples(&mut self, ticket: SearchTicket, center: Coordinate) {
        let outcome = self.api.temples(center, self.state.radius).await;
        self.finish_search(ticket, outcome);
    }

    fn fail(&mut self, ticket: SearchTicket, message: &str) {
        if self.is_current(ticket) {
            self.state.loading = false;
            self.state.error = Some(message.to_string());
        }
    }

    fn recenter(&mut self, center: Coordinate) {
        self.state.center = center;
        self.sync_view();
    }

    fn sync_view(&mut self) {
        self.map.set_view(self.state.center);
        self.map.set_overlay(Some(Overlay {
            center: self.state.center,
            radius_meters: self.state.radius.meters(),
        }));
    }

    fn sync_markers(&mut self) {
        let markers: Vec<Marker> = self.state.results.iter().map(Marker::from_place).collect();
        self.map.set_markers(markers);
        if let Some(bounds) = Bounds::from_points(self.state.results.iter().map(|p| p.coordinate)) {
            self.map.fit_bounds(bounds.pad(FIT_PADDING));
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
