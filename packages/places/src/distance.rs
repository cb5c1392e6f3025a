//! Great-circle distance on a spherical Earth.

use geo::{Distance as _, HaversineMeasure};
use safeguard_location_models::Coordinate;

/// Mean Earth radius used for haversine distances, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

const HAVERSINE: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_METERS);

/// Haversine distance between two coordinates, in meters.
///
/// Symmetric, and exactly zero for identical coordinates.
#[must_use]
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    HAVERSINE.distance(geo::Point::from(*a), geo::Point::from(*b))
}

/// Formats a distance for display: whole meters below 1 km, otherwise
/// kilometers with one decimal.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
