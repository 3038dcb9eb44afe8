//! Tests for silhouette module

use tracecluster::{silhouette_samples, silhouette_score};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_hand_computed_score() {
    // a(0) = 1, b(0) = (4 + 5) / 2 = 4.5 -> s = 3.5 / 4.5
    let data = vec![vec![0.0], vec![1.0], vec![4.0], vec![5.0]];
    let samples = silhouette_samples(&data, &[0, 0, 1, 1]);
    assert!(approx_eq(samples[0], 3.5 / 4.5, 1e-12));
    // a(1) = 1, b(1) = (3 + 4) / 2 = 3.5 -> s = 2.5 / 3.5
    assert!(approx_eq(samples[1], 2.5 / 3.5, 1e-12));
    // Symmetric layout
    assert!(approx_eq(samples[2], samples[1], 1e-12));
    assert!(approx_eq(samples[3], samples[0], 1e-12));

    let expected = (3.5 / 4.5 + 2.5 / 3.5) / 2.0;
    assert!(approx_eq(silhouette_score(&data, &[0, 0, 1, 1]), expected, 1e-12));
}

#[test]
fn test_scores_within_bounds() {
    let data: Vec<Vec<f64>> = (0..12)
        .map(|i| vec![(i * 7 % 5) as f64, (i * 3 % 4) as f64])
        .collect();
    for labels in [
        vec![0, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2],
        vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
        vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
    ] {
        let score = silhouette_score(&data, &labels);
        assert!((-1.0..=1.0).contains(&score));
        for s in silhouette_samples(&data, &labels) {
            assert!((-1.0..=1.0).contains(&s));
        }
    }
}

#[test]
fn test_bad_assignment_scores_negative() {
    let data = vec![vec![0.0], vec![0.1], vec![10.0], vec![10.1]];
    assert!(silhouette_score(&data, &[0, 1, 0, 1]) < 0.0);
}

#[test]
fn test_single_cluster_is_zero() {
    let data = vec![vec![0.0], vec![1.0], vec![2.0]];
    assert_eq!(silhouette_score(&data, &[0, 0, 0]), 0.0);
    // Label ids need not start at 0
    assert_eq!(silhouette_score(&data, &[2, 2, 2]), 0.0);
}

#[test]
fn test_empty_is_zero() {
    assert_eq!(silhouette_score(&[], &[]), 0.0);
    assert!(silhouette_samples(&[], &[]).is_empty());
}

#[test]
fn test_singleton_cluster_uses_zero_intra_distance() {
    // Point 2 is alone: a = 0, b > 0 -> s = 1
    let data = vec![vec![0.0], vec![1.0], vec![9.0]];
    let samples = silhouette_samples(&data, &[0, 0, 1]);
    assert_eq!(samples[2], 1.0);
}

#[test]
fn test_coincident_points_score_zero() {
    let data = vec![vec![1.0], vec![1.0]];
    let samples = silhouette_samples(&data, &[0, 1]);
    assert_eq!(samples, vec![0.0, 0.0]);
}
