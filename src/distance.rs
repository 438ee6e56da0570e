//! Route length calculation.
//!
//! Sums the haversine distance of every consecutive pair of points and
//! rounds the total to one decimal kilometer, which is what route popups
//! display.

use crate::geo_utils::haversine_distance_km;
use crate::GpsPoint;

/// Total path length in kilometers, unrounded.
///
/// Zero or one point gives 0.0.
pub fn calculate_route_distance_km(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance_km(&w[0], &w[1]))
        .sum()
}

/// Total path length in kilometers rounded to one decimal.
///
/// # Example
/// ```
/// use routemap::GpsPoint;
/// use routemap::distance::route_distance_km;
///
/// let points = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 1.0)];
/// assert_eq!(route_distance_km(&points), 111.2);
/// assert_eq!(route_distance_km(&points[..1]), 0.0);
/// ```
pub fn route_distance_km(points: &[GpsPoint]) -> f64 {
    round_to_tenth(calculate_route_distance_km(points))
}

/// Round half-up to one decimal place.
///
/// Distances are never negative, so `f64::round` (half away from zero)
/// behaves as half-up here.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimated walking time in whole minutes for a distance, rounded up.
pub fn walking_minutes(distance_km: f64, minutes_per_km: f64) -> u32 {
    let minutes = (distance_km * minutes_per_km).ceil();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u32
    } else {
        0
    }
}
