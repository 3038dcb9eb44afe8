//! Geographic utilities: great-circle distance, bearings and bounds.

use crate::{Bounds, GpsPoint};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlng = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Initial compass bearing from `from` towards `to`, in degrees `[0, 360)`.
pub fn initial_bearing(from: &GpsPoint, to: &GpsPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlng = (to.longitude - from.longitude).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Absolute angular difference between two bearings, folded into `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Linear interpolation between two bearings along the shorter arc.
///
/// `t = 0` yields `from`, `t = 1` yields `to`; the result is normalized
/// into `[0, 360)` so interpolating across north never lands on e.g. 180°.
pub fn interpolate_bearing(from: f64, to: f64, t: f64) -> f64 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    normalize_bearing(from + delta * t)
}

/// Compute the bounding box of a track. Empty tracks yield a zero box.
pub fn compute_bounds(points: &[GpsPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}

/// Compute the center of a track's bounding box. Empty tracks yield `(0, 0)`.
pub fn compute_center(points: &[GpsPoint]) -> GpsPoint {
    compute_bounds(points).center()
}

/// Cumulative distances along a route.
/// Returns a vector where `dist[i]` is the distance from the start to point `i`.
pub fn cumulative_distances(points: &[GpsPoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    if points.is_empty() {
        return distances;
    }
    distances.push(0.0);

    for i in 1..points.len() {
        let prev_dist = distances[i - 1];
        let segment_dist = haversine_distance(&points[i - 1], &points[i]);
        distances.push(prev_dist + segment_dist);
    }

    distances
}
