//! Tests for signature module

use tracecluster::signature::downsample;
use tracecluster::{ClusterError, GpsPoint, RouteSignature, SignatureConfig};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn straight(n: usize) -> Vec<GpsPoint> {
    (0..n)
        .map(|i| GpsPoint::new(51.5 + i as f64 * 0.0005, -0.12 + i as f64 * 0.0003))
        .collect()
}

#[test]
fn test_bearings_per_segment() {
    let points = vec![
        GpsPoint::new(51.5074, -0.1278),
        GpsPoint::new(51.5084, -0.1278),
        GpsPoint::new(51.5084, -0.1268),
        GpsPoint::new(51.5074, -0.1268),
    ];
    let sig = RouteSignature::from_points(&points, &SignatureConfig::default());

    assert_eq!(sig.bearings.len(), 3);
    assert!(approx_eq(sig.bearings[0], 0.0, 1e-6));
    assert!(approx_eq(sig.bearings[1], 90.0, 0.01));
    assert!(approx_eq(sig.bearings[2], 180.0, 1e-6));
    assert_eq!(sig.start_point, points[0]);
    assert_eq!(sig.end_point, points[3]);
}

#[test]
fn test_long_route_is_downsampled() {
    let sig = RouteSignature::from_points(&straight(500), &SignatureConfig::default());
    assert!(sig.bearings.len() <= 49);
    assert!(!sig.bearings.is_empty());
    // Last point always survives
    assert_eq!(sig.end_point, straight(500)[499]);
}

#[test]
fn test_max_sample_points_is_configurable() {
    let config = SignatureConfig {
        max_sample_points: 10,
    };
    let sig = RouteSignature::from_points(&straight(100), &config);
    assert!(sig.bearings.len() <= 9);
}

#[test]
fn test_distances_accumulate() {
    let sig = RouteSignature::from_points(&straight(30), &SignatureConfig::default());

    assert_eq!(sig.cumulative_distances.len(), sig.bearings.len());
    assert!(sig.cumulative_distances.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(sig.cumulative_distances.last().copied(), Some(sig.total_distance));
    assert!(sig.total_distance > 0.0);
}

#[test]
fn test_bounds_and_center() {
    let sig = RouteSignature::from_points(&straight(11), &SignatureConfig::default());
    assert!(approx_eq(sig.bounds.min_lat, 51.5, 1e-12));
    assert!(approx_eq(sig.bounds.max_lat, 51.505, 1e-12));
    assert!(approx_eq(sig.center.latitude, 51.5025, 1e-12));
    assert!(approx_eq(sig.center.longitude, -0.1185, 1e-12));
}

#[test]
fn test_single_point_is_empty() {
    let p = GpsPoint::new(45.0, 7.0);
    let sig = RouteSignature::from_points(&[p], &SignatureConfig::default());
    assert!(sig.is_empty());
    assert_eq!(sig.total_distance, 0.0);
    assert_eq!(sig.start_point, p);
    assert_eq!(sig.end_point, p);
}

#[test]
fn test_no_points_is_empty() {
    let sig = RouteSignature::from_points(&[], &SignatureConfig::default());
    assert!(sig.is_empty());
    assert!(sig.cumulative_distances.is_empty());
}

#[test]
fn test_invalid_points_are_skipped() {
    let mut points = straight(5);
    points.insert(2, GpsPoint::new(f64::NAN, 0.0));
    points.push(GpsPoint::new(95.0, 0.0));

    let sig = RouteSignature::from_points(&points, &SignatureConfig::default());
    assert_eq!(sig.bearings.len(), 4);
    assert_eq!(sig.end_point, straight(5)[4]);
}

#[test]
fn test_try_from_points() {
    let config = SignatureConfig::default();
    assert!(RouteSignature::try_from_points(0, &straight(3), &config).is_ok());

    let err = RouteSignature::try_from_points(4, &straight(1), &config).unwrap_err();
    assert_eq!(
        err,
        ClusterError::InsufficientPoints {
            route_index: 4,
            point_count: 1,
            minimum_required: 2,
        }
    );
}

#[test]
fn test_downsample_stride() {
    // 101 points, stride ceil(100 / 49) = 3 -> indices 0, 3, ..., 99 plus 100
    let points = straight(101);
    let sampled = downsample(&points, 50);
    assert_eq!(sampled.len(), 35);
    assert_eq!(sampled[1], points[3]);
    assert_eq!(sampled[33], points[99]);
    assert_eq!(sampled[34], points[100]);
}
