//! DBSCAN over a precomputed dissimilarity matrix.
//!
//! The matrix is dense, so eps-neighborhoods are read directly from its rows
//! without a spatial index.

use std::collections::VecDeque;

use crate::comparison::DistanceMatrix;

/// Label given to points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Cluster the items of `matrix`.
///
/// A point is a core point when at least `min_samples` items (itself
/// included) lie within `eps` of it. Clusters grow transitively from core
/// points; non-core points reached during expansion become border members,
/// even if they were marked as noise earlier. Cluster ids start at 0 in
/// order of discovery; unreached points keep [`NOISE`].
///
/// # Example
/// ```
/// use tracecluster::{dbscan, DistanceMatrix, NOISE};
///
/// let matrix = DistanceMatrix::from_rows(&[
///     vec![0.0, 0.1, 0.9],
///     vec![0.1, 0.0, 0.9],
///     vec![0.9, 0.9, 0.0],
/// ]);
/// assert_eq!(dbscan(&matrix, 0.25, 2), vec![0, 0, NOISE]);
/// ```
pub fn dbscan(matrix: &DistanceMatrix, eps: f64, min_samples: usize) -> Vec<i32> {
    let n = matrix.len();
    let mut labels: Vec<Option<i32>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut next_cluster = 0;

    for point in 0..n {
        if visited[point] {
            continue;
        }
        visited[point] = true;

        let neighbors = region_query(matrix, point, eps);
        if neighbors.len() < min_samples {
            labels[point] = Some(NOISE);
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[point] = Some(cluster);

        let mut queue: VecDeque<usize> = neighbors.into();
        while let Some(candidate) = queue.pop_front() {
            match labels[candidate] {
                None | Some(NOISE) => labels[candidate] = Some(cluster),
                Some(_) => {}
            }

            if visited[candidate] {
                continue;
            }
            visited[candidate] = true;

            let expansion = region_query(matrix, candidate, eps);
            if expansion.len() >= min_samples {
                queue.extend(expansion);
            }
        }
    }

    labels.into_iter().map(|l| l.unwrap_or(NOISE)).collect()
}

/// Indices whose dissimilarity to `point` is at most `eps` (including `point`).
pub fn region_query(matrix: &DistanceMatrix, point: usize, eps: f64) -> Vec<usize> {
    matrix
        .row(point)
        .iter()
        .enumerate()
        .filter(|(_, score)| **score <= eps)
        .map(|(i, _)| i)
        .collect()
}

/// Number of clusters in a DBSCAN labeling.
pub fn cluster_count(labels: &[i32]) -> usize {
    labels
        .iter()
        .copied()
        .filter(|&l| l >= 0)
        .max()
        .map_or(0, |m| m as usize + 1)
}

/// Number of points labeled as noise.
pub fn noise_count(labels: &[i32]) -> usize {
    labels.iter().filter(|&&l| l == NOISE).count()
}
