//! K-Means clustering with k-means++ seeding.
//!
//! Seeding draws from [`SeededRng`], so identical input, `k` and seed always
//! produce identical labels and centroids.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::rng::SeededRng;

/// Configuration for a single K-Means run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Maximum assignment/update rounds. Default: 100
    pub max_iterations: usize,
    /// Seed for k-means++ initialization. Default: 42
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            seed: 42,
        }
    }
}

/// Output of [`fit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KMeansFit {
    /// Cluster index in `[0, k)` for every input row
    pub labels: Vec<usize>,
    /// Final centroids, one per cluster
    pub centroids: Vec<Vec<f64>>,
    /// Number of update rounds performed
    pub iterations: usize,
    /// True if assignments stopped changing before `max_iterations`
    pub converged: bool,
    /// Sum of squared distances from each row to its centroid
    pub inertia: f64,
}

/// Squared Euclidean distance.
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean distance.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Fit K-Means to `data` with `k` clusters.
///
/// Returns an empty fit when `data` is empty or `k == 0`. Passing `k` larger
/// than the number of distinct rows is a caller error: it does not panic, but
/// some clusters will stay empty.
///
/// # Example
/// ```
/// use tracecluster::kmeans::{fit, KMeansConfig};
///
/// let data = vec![vec![0.0], vec![0.5], vec![10.0], vec![10.5]];
/// let result = fit(&data, 2, &KMeansConfig::default());
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_ne!(result.labels[0], result.labels[2]);
/// ```
pub fn fit(data: &[Vec<f64>], k: usize, config: &KMeansConfig) -> KMeansFit {
    if data.is_empty() || k == 0 {
        return KMeansFit {
            converged: true,
            ..KMeansFit::default()
        };
    }

    let mut rng = SeededRng::new(config.seed);
    let mut centroids = kmeans_plus_plus(data, k, &mut rng);
    let mut labels = assign_labels(data, &centroids);

    let mut iterations = 0;
    let mut converged = false;
    while iterations < config.max_iterations {
        iterations += 1;
        centroids = update_centroids(data, &labels, &centroids);

        let next = assign_labels(data, &centroids);
        if next == labels {
            converged = true;
            break;
        }
        labels = next;
    }

    let inertia = data
        .iter()
        .zip(&labels)
        .map(|(row, &label)| squared_euclidean(row, &centroids[label]))
        .sum();

    debug!(
        "[KMeans] k={} n={} iterations={} converged={} inertia={:.4}",
        k,
        data.len(),
        iterations,
        converged,
        inertia
    );

    KMeansFit {
        labels,
        centroids,
        iterations,
        converged,
        inertia,
    }
}

/// Choose `k` initial centroids with k-means++.
///
/// The first centroid is `data[floor(rng.next() * n)]`. Each following one is
/// sampled with probability proportional to the squared distance to the
/// nearest centroid chosen so far, by walking the cumulative probabilities
/// against one draw. When the walk falls off the end (rounding, or all
/// distances zero) the last row is used.
pub fn kmeans_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut SeededRng) -> Vec<Vec<f64>> {
    let n = data.len();
    if n == 0 || k == 0 {
        return Vec::new();
    }

    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[rng.next_index(n)].clone());

    while centroids.len() < k {
        let distances: Vec<f64> = data
            .iter()
            .map(|row| {
                centroids
                    .iter()
                    .map(|c| squared_euclidean(row, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = distances.iter().sum();

        let draw = rng.next();
        let mut chosen = n - 1;
        if total > 0.0 {
            let mut cumulative = 0.0;
            for (i, d) in distances.iter().enumerate() {
                cumulative += d / total;
                if draw < cumulative {
                    chosen = i;
                    break;
                }
            }
        }
        centroids.push(data[chosen].clone());
    }

    centroids
}

/// Assign every row to its nearest centroid (ties go to the lower index).
pub fn assign_labels(data: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    data.iter()
        .map(|row| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (i, c) in centroids.iter().enumerate() {
                let dist = squared_euclidean(row, c);
                if dist < best_dist {
                    best_dist = dist;
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// Recompute centroids as the mean of their members.
///
/// A cluster with no members keeps its previous centroid.
pub fn update_centroids(
    data: &[Vec<f64>],
    labels: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let dims = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dims]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (row, &label) in data.iter().zip(labels) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(row) {
            *sum += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}
