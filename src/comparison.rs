//! Pairwise route comparison.
//!
//! Two signatures are scored in `[0, 1]` (0 = identical, 1 = maximally
//! dissimilar) as a weighted sum of:
//! - location: how far apart the start and end points are
//! - distance: relative difference in total length
//! - bearing shape: mean angular difference of the resampled bearing sequences

use serde::{Deserialize, Serialize};

use crate::geo_utils::{angular_difference, haversine_distance, interpolate_bearing};
use crate::signature::RouteSignature;

/// Weights and saturation points for [`compare_signatures`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Weight of the start/end location score. Default: 0.3
    pub location_weight: f64,
    /// Weight of the total distance score. Default: 0.2
    pub distance_weight: f64,
    /// Weight of the bearing-shape score. Default: 0.5
    pub bearing_weight: f64,
    /// Combined start + end separation (meters) at which the location score
    /// saturates to 1. Default: 10000.0
    pub location_saturation_m: f64,
    /// Relative length difference at which the distance score saturates to 1.
    /// Default: 0.5
    pub distance_saturation_ratio: f64,
    /// Upper bound on the common bearing sequence length. Default: 30
    pub max_bearing_samples: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            location_weight: 0.3,
            distance_weight: 0.2,
            bearing_weight: 0.5,
            location_saturation_m: 10_000.0,
            distance_saturation_ratio: 0.5,
            max_bearing_samples: 30,
        }
    }
}

/// Score the dissimilarity of two routes in `[0, 1]`. Symmetric in its arguments.
///
/// Returns 1.0 immediately if either signature has no bearings.
///
/// # Example
/// ```
/// use tracecluster::{
///     compare_signatures, ComparisonConfig, GpsPoint, RouteSignature, SignatureConfig,
/// };
///
/// let points: Vec<GpsPoint> = (0..10)
///     .map(|i| GpsPoint::new(51.5 + i as f64 * 0.001, -0.12))
///     .collect();
/// let a = RouteSignature::from_points(&points, &SignatureConfig::default());
/// let b = a.clone();
/// assert!(compare_signatures(&a, &b, &ComparisonConfig::default()) < 1e-9);
/// ```
pub fn compare_signatures(
    a: &RouteSignature,
    b: &RouteSignature,
    config: &ComparisonConfig,
) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 1.0;
    }

    config.location_weight * location_score(a, b, config)
        + config.distance_weight * distance_score(a, b, config)
        + config.bearing_weight * bearing_shape_score(a, b, config)
}

/// Start/end separation score in `[0, 1]`.
pub fn location_score(
    a: &RouteSignature,
    b: &RouteSignature,
    config: &ComparisonConfig,
) -> f64 {
    let separation = haversine_distance(&a.start_point, &b.start_point)
        + haversine_distance(&a.end_point, &b.end_point);
    if config.location_saturation_m <= 0.0 {
        return if separation > 0.0 { 1.0 } else { 0.0 };
    }
    (separation / config.location_saturation_m).min(1.0)
}

/// Relative length difference score in `[0, 1]`. Two zero-length routes score 0.
pub fn distance_score(
    a: &RouteSignature,
    b: &RouteSignature,
    config: &ComparisonConfig,
) -> f64 {
    let longest = a.total_distance.max(b.total_distance);
    if longest <= 0.0 {
        return 0.0;
    }
    let relative = (a.total_distance - b.total_distance).abs() / longest;
    if config.distance_saturation_ratio <= 0.0 {
        return if relative > 0.0 { 1.0 } else { 0.0 };
    }
    (relative / config.distance_saturation_ratio).min(1.0)
}

/// Mean folded angular difference of the resampled bearings, normalized to `[0, 1]`.
///
/// Both sequences are resampled to `min(max(len_a, len_b), max_bearing_samples)`.
/// Returns 1.0 if either sequence is empty.
pub fn bearing_shape_score(
    a: &RouteSignature,
    b: &RouteSignature,
    config: &ComparisonConfig,
) -> f64 {
    if a.bearings.is_empty() || b.bearings.is_empty() {
        return 1.0;
    }

    let length = a
        .bearings
        .len()
        .max(b.bearings.len())
        .min(config.max_bearing_samples)
        .max(1);

    let resampled_a = resample_bearings(&a.bearings, length);
    let resampled_b = resample_bearings(&b.bearings, length);

    let total: f64 = resampled_a
        .iter()
        .zip(&resampled_b)
        .map(|(x, y)| angular_difference(*x, *y))
        .sum();

    total / (180.0 * length as f64)
}

/// Resample a bearing sequence to `target_len` values.
///
/// Interpolates linearly along the shorter arc so that e.g. 350° and 10°
/// blend through 0° rather than 180°.
pub fn resample_bearings(bearings: &[f64], target_len: usize) -> Vec<f64> {
    if bearings.is_empty() || target_len == 0 {
        return Vec::new();
    }
    if bearings.len() == target_len {
        return bearings.to_vec();
    }
    if bearings.len() == 1 || target_len == 1 {
        return vec![bearings[0]; target_len];
    }

    let last = (bearings.len() - 1) as f64;
    let step = last / (target_len - 1) as f64;

    (0..target_len)
        .map(|i| {
            let pos = (i as f64 * step).min(last);
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(bearings.len() - 1);
            interpolate_bearing(bearings[lo], bearings[hi], pos - lo as f64)
        })
        .collect()
}

// ============================================================================
// Similarity Matrix
// ============================================================================

/// Dense symmetric `n x n` matrix of pairwise dissimilarity scores.
///
/// The diagonal is 0 by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// An all-zero matrix of the given size.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build from row vectors. Rows are expected to be square and symmetric.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let size = rows.len();
        let mut matrix = Self::zeros(size);
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().take(size).enumerate() {
                matrix.values[i * size + j] = *value;
            }
        }
        matrix
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score between routes `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Set the score for the pair `(i, j)`, keeping the matrix symmetric.
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.size + j] = value;
        self.values[j * self.size + i] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Copy into nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Compare every pair of signatures.
///
/// Each unordered pair is compared once; cost is quadratic in the number of routes.
pub fn similarity_matrix(
    signatures: &[RouteSignature],
    config: &ComparisonConfig,
) -> DistanceMatrix {
    let n = signatures.len();
    let mut matrix = DistanceMatrix::zeros(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let score = compare_signatures(&signatures[i], &signatures[j], config);
            matrix.set_symmetric(i, j, score);
        }
    }

    matrix
}

/// Compare every pair of signatures in parallel.
///
/// Produces exactly the same matrix as [`similarity_matrix`]; each cell is
/// computed independently. Recommended for large route sets (100+).
#[cfg(feature = "parallel")]
pub fn similarity_matrix_parallel(
    signatures: &[RouteSignature],
    config: &ComparisonConfig,
) -> DistanceMatrix {
    use rayon::prelude::*;

    let n = signatures.len();
    let scores: Vec<(usize, usize, f64)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n).map(move |j| {
                (
                    i,
                    j,
                    compare_signatures(&signatures[i], &signatures[j], config),
                )
            })
        })
        .collect();

    let mut matrix = DistanceMatrix::zeros(n);
    for (i, j, score) in scores {
        matrix.set_symmetric(i, j, score);
    }
    matrix
}
