//! Rolling resistance coefficients from road surface tags.
//!
//! Surface tags follow the OpenStreetMap `surface` key as returned by a map-matching
//! service.  Querying the service is up to the caller.

use crate::imports::*;
use crate::params::DEFAULT_ROLLING_COEF;

/// Known road surfaces and their rolling resistance coefficients
pub const SURFACE_ROLLING_COEFS: [(&str, f64); 3] = [
    // engineeringtoolbox.com
    ("asphalt", 0.02),
    // engineeringtoolbox.com
    ("cobblestone", 0.015),
    // Reimpell et al., "The Automotive Chassis"
    ("paving_stones", 0.033),
];

/// Returns the rolling resistance coefficient of a surface tag, or
/// [DEFAULT_ROLLING_COEF] for unknown or missing tags
pub fn rolling_coef_for_surface(surface: Option<&str>) -> f64 {
    surface
        .and_then(|surface| {
            let surface = surface.trim().to_lowercase();
            SURFACE_ROLLING_COEFS
                .iter()
                .find(|(tag, _)| *tag == surface)
                .map(|(_, coef)| *coef)
        })
        .unwrap_or(DEFAULT_ROLLING_COEF)
}

/// Returns per-sample rolling resistance coefficients for per-sample surface tags.
///
/// A missing tag takes the tag of the previous sample, a missing first tag falls back to
/// [DEFAULT_ROLLING_COEF].
pub fn rolling_coefs_for_surfaces<S: AsRef<str>>(surfaces: &[Option<S>]) -> Array1<f64> {
    let mut last: Option<&str> = None;
    let mut n_defaulted = 0;
    let coefs: Array1<f64> = surfaces
        .iter()
        .map(|surface| {
            if let Some(surface) = surface {
                last = Some(surface.as_ref());
            }
            if last.is_none() {
                n_defaulted += 1;
            }
            rolling_coef_for_surface(last)
        })
        .collect();
    if n_defaulted > 0 {
        log::warn!(
            "{n_defaulted} of {} samples have no road surface, using rolling coefficient {DEFAULT_ROLLING_COEF}",
            surfaces.len()
        );
    }
    coefs
}
