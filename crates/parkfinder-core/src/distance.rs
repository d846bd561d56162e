//! Great-circle distance between coordinates.
//!
//! Haversine on a mean-radius sphere. Error against the ellipsoid is well
//! under 0.5% at city scale, which is all ranking needs.

use crate::types::Coordinate;

/// IUGG mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Distance in meters between `a` and `b`.
///
/// Returns `f64::INFINITY` if either coordinate is non-finite, so a malformed
/// catalog entry ranks last instead of poisoning the comparison.
#[must_use]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    let meters = EARTH_RADIUS_M * c;
    if meters.is_finite() {
        meters.max(0.0)
    } else {
        f64::INFINITY
    }
}

/// Effective distance used for ranking: `+∞` when either side is missing.
#[must_use]
pub fn ranking_distance(user: Option<Coordinate>, venue: Option<Coordinate>) -> f64 {
    match (user, venue) {
        (Some(u), Some(v)) => distance(u, v),
        _ => f64::INFINITY,
    }
}
