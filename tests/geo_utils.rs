//! Tests for geo_utils module

use tracecluster::GpsPoint;
use tracecluster::geo_utils::*;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    let p = GpsPoint::new(51.5074, -0.1278);
    assert_eq!(haversine_distance(&p, &p), 0.0);
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let london = GpsPoint::new(51.5074, -0.1278);
    let paris = GpsPoint::new(48.8566, 2.3522);
    let dist = haversine_distance(&london, &paris);
    assert!(approx_eq(dist, 343_560.0, 5000.0)); // Within 5km
}

#[test]
fn test_haversine_one_degree_latitude() {
    let a = GpsPoint::new(0.0, 0.0);
    let b = GpsPoint::new(1.0, 0.0);
    let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
    assert!(approx_eq(haversine_distance(&a, &b), expected, 1e-6));
}

#[test]
fn test_haversine_symmetric() {
    let a = GpsPoint::new(47.37, 8.55);
    let b = GpsPoint::new(46.2, 6.15);
    assert!(approx_eq(
        haversine_distance(&a, &b),
        haversine_distance(&b, &a),
        1e-9
    ));
}

#[test]
fn test_initial_bearing_cardinal_directions() {
    let origin = GpsPoint::new(45.0, 7.0);
    let north = GpsPoint::new(45.01, 7.0);
    let south = GpsPoint::new(44.99, 7.0);
    let east = GpsPoint::new(45.0, 7.01);
    let west = GpsPoint::new(45.0, 6.99);

    assert!(approx_eq(initial_bearing(&origin, &north), 0.0, 1e-9));
    assert!(approx_eq(initial_bearing(&origin, &south), 180.0, 1e-9));
    // Initial bearing along a parallel deviates slightly from 90/270
    assert!(approx_eq(initial_bearing(&origin, &east), 90.0, 0.01));
    assert!(approx_eq(initial_bearing(&origin, &west), 270.0, 0.01));
}

#[test]
fn test_initial_bearing_range() {
    let origin = GpsPoint::new(10.0, 10.0);
    for (dlat, dlng) in [(0.1, 0.1), (-0.1, 0.1), (-0.1, -0.1), (0.1, -0.1)] {
        let b = initial_bearing(&origin, &GpsPoint::new(10.0 + dlat, 10.0 + dlng));
        assert!((0.0..360.0).contains(&b));
    }
}

#[test]
fn test_normalize_bearing() {
    assert_eq!(normalize_bearing(0.0), 0.0);
    assert_eq!(normalize_bearing(360.0), 0.0);
    assert_eq!(normalize_bearing(-90.0), 270.0);
    assert_eq!(normalize_bearing(450.0), 90.0);
    assert!(normalize_bearing(-1e-15) < 360.0);
}

#[test]
fn test_angular_difference_folds() {
    assert_eq!(angular_difference(10.0, 350.0), 20.0);
    assert_eq!(angular_difference(350.0, 10.0), 20.0);
    assert_eq!(angular_difference(0.0, 180.0), 180.0);
    assert_eq!(angular_difference(90.0, 90.0), 0.0);
    assert_eq!(angular_difference(0.0, 270.0), 90.0);
}

#[test]
fn test_interpolate_bearing_across_north() {
    assert!(approx_eq(interpolate_bearing(350.0, 10.0, 0.5), 0.0, 1e-9));
    assert!(approx_eq(interpolate_bearing(10.0, 350.0, 0.25), 5.0, 1e-9));
    assert!(approx_eq(interpolate_bearing(80.0, 100.0, 0.5), 90.0, 1e-9));
    assert!(approx_eq(interpolate_bearing(80.0, 100.0, 0.0), 80.0, 1e-9));
    assert!(approx_eq(interpolate_bearing(80.0, 100.0, 1.0), 100.0, 1e-9));
}

#[test]
fn test_compute_bounds() {
    let track = vec![
        GpsPoint::new(51.50, -0.13),
        GpsPoint::new(51.51, -0.12),
        GpsPoint::new(51.505, -0.125),
    ];
    let bounds = compute_bounds(&track);
    assert_eq!(bounds.min_lat, 51.50);
    assert_eq!(bounds.max_lat, 51.51);
    assert_eq!(bounds.min_lng, -0.13);
    assert_eq!(bounds.max_lng, -0.12);
}

#[test]
fn test_compute_center() {
    let track = vec![GpsPoint::new(51.50, -0.10), GpsPoint::new(51.52, -0.12)];
    let center = compute_center(&track);
    assert!(approx_eq(center.latitude, 51.51, 0.001));
    assert!(approx_eq(center.longitude, -0.11, 0.001));
}

#[test]
fn test_compute_center_empty() {
    let empty: Vec<GpsPoint> = vec![];
    let center = compute_center(&empty);
    assert_eq!(center.latitude, 0.0);
    assert_eq!(center.longitude, 0.0);
}

#[test]
fn test_cumulative_distances() {
    let track = vec![
        GpsPoint::new(0.0, 0.0),
        GpsPoint::new(0.001, 0.0),
        GpsPoint::new(0.002, 0.0),
    ];
    let dists = cumulative_distances(&track);
    assert_eq!(dists.len(), 3);
    assert_eq!(dists[0], 0.0);
    assert!(approx_eq(dists[2], 2.0 * dists[1], 1e-6));
    assert!(cumulative_distances(&[]).is_empty());
}
