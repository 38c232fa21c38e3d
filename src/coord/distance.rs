//! Great-circle distance
//!
//! Haversine distance on a spherical Earth, expressed in kilometers.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in kilometers, always >= 0
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from an optional reference point
///
/// No reference (e.g. a text search without a location bias) yields 0.
pub fn distance_from(reference: Option<Coordinates>, point: Coordinates) -> f64 {
    reference.map_or(0.0, |origin| haversine_km(origin, point))
}

/// Format a distance for display with one decimal ("1.3 km")
pub fn format_distance_km(distance_km: f64) -> String {
    format!("{:.1} km", distance_km)
}
