//! Tests for dbscan module

use tracecluster::dbscan::{cluster_count, noise_count, region_query};
use tracecluster::{DistanceMatrix, NOISE, dbscan};

/// Two tight groups {0, 1, 2} and {3, 4} plus an outlier 5.
fn groups() -> DistanceMatrix {
    let mut m = DistanceMatrix::zeros(6);
    for i in 0..6 {
        for j in (i + 1)..6 {
            m.set_symmetric(i, j, 0.9);
        }
    }
    m.set_symmetric(0, 1, 0.05);
    m.set_symmetric(0, 2, 0.1);
    m.set_symmetric(1, 2, 0.08);
    m.set_symmetric(3, 4, 0.12);
    m
}

#[test]
fn test_two_clusters_and_noise() {
    let labels = dbscan(&groups(), 0.25, 2);
    assert_eq!(labels, vec![0, 0, 0, 1, 1, NOISE]);
    assert_eq!(cluster_count(&labels), 2);
    assert_eq!(noise_count(&labels), 1);
}

#[test]
fn test_cluster_ids_follow_discovery_order() {
    // Reorder so the pair is seen before the triple
    let mut m = DistanceMatrix::zeros(5);
    for i in 0..5 {
        for j in (i + 1)..5 {
            m.set_symmetric(i, j, 0.9);
        }
    }
    m.set_symmetric(0, 1, 0.1);
    m.set_symmetric(2, 3, 0.1);
    m.set_symmetric(2, 4, 0.1);
    m.set_symmetric(3, 4, 0.1);
    assert_eq!(dbscan(&m, 0.25, 2), vec![0, 0, 1, 1, 1]);
}

#[test]
fn test_zero_eps_is_all_noise() {
    let labels = dbscan(&groups(), 0.0, 2);
    assert!(labels.iter().all(|&l| l == NOISE));
}

#[test]
fn test_min_samples_one_makes_every_point_core() {
    let labels = dbscan(&groups(), 0.25, 1);
    assert_eq!(labels, vec![0, 0, 0, 1, 1, 2]);
}

#[test]
fn test_large_min_samples_is_all_noise() {
    let labels = dbscan(&groups(), 0.25, 4);
    assert!(labels.iter().all(|&l| l == NOISE));
}

#[test]
fn test_chain_is_connected_transitively() {
    // 0-1-2-3 each 0.2 apart from the next, 0.9 otherwise
    let mut m = DistanceMatrix::zeros(4);
    for i in 0..4 {
        for j in (i + 1)..4 {
            m.set_symmetric(i, j, if j == i + 1 { 0.2 } else { 0.9 });
        }
    }
    assert_eq!(dbscan(&m, 0.25, 2), vec![0, 0, 0, 0]);
}

#[test]
fn test_earlier_noise_becomes_border() {
    // 0 only reaches 1 (not core at min_samples 3); 1 reaches 0 and 2 and is core
    let m = DistanceMatrix::from_rows(&[
        vec![0.0, 0.2, 0.9],
        vec![0.2, 0.0, 0.2],
        vec![0.9, 0.2, 0.0],
    ]);
    assert_eq!(dbscan(&m, 0.25, 3), vec![0, 0, 0]);
}

#[test]
fn test_region_query_includes_self() {
    assert_eq!(region_query(&groups(), 3, 0.25), vec![3, 4]);
    assert_eq!(region_query(&groups(), 5, 0.25), vec![5]);
}

#[test]
fn test_empty_matrix() {
    assert!(dbscan(&DistanceMatrix::zeros(0), 0.25, 2).is_empty());
    assert_eq!(cluster_count(&[]), 0);
}
