use std::fmt::Write as _;

use crate::controller::ClientViewState;

pub const SEARCHING: &str = "Searching temples…";
pub const NO_RESULTS: &str = "No temples found in this area.";

/// Renders the results list with its loading and error banners.
#[must_use]
pub fn render_results(state: &ClientViewState) -> String {
    let mut out = String::new();
    if state.loading {
        let _ = writeln!(out, "{SEARCHING}");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
    }

    if state.results.is_empty() {
        if !state.loading {
            let _ = writeln!(out, "{NO_RESULTS}");
        }
        return out;
    }

    for (index, place) in state.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} | {} | {:.2} km",
            index + 1,
            place.name,
            place.religion().unwrap_or("place of worship"),
            place.distance_km()
        );
    }
    out
}
