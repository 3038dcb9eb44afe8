//! Model-order selection and the activity clustering pipeline.
//!
//! Runs K-Means for every candidate `k`, scores each labeling with the
//! silhouette coefficient and keeps the best one. The full score curve is
//! returned so callers can show why a particular `k` won.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::{ActivityRecord, FeatureKey, UnitSystem, extract_features};
use crate::kmeans::{self, KMeansConfig};
use crate::silhouette::silhouette_score;
use crate::standardize::{check_dimensions, standardize};

/// Configuration for model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Candidate cluster counts, evaluated in order. Default: `[2, 3, 4, 5, 6]`
    pub k_range: Vec<usize>,
    /// Settings shared by every K-Means run
    pub kmeans: KMeansConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k_range: vec![2, 3, 4, 5, 6],
            kmeans: KMeansConfig::default(),
        }
    }
}

/// Silhouette score obtained for one candidate `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KScore {
    pub k: usize,
    pub score: f64,
}

/// Outcome of clustering with automatic `k` selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    /// Winning cluster count
    pub best_k: usize,
    /// Cluster index per input row
    pub labels: Vec<usize>,
    /// Centroids in the space the clustering ran in (standardized for activities)
    pub centroids: Vec<Vec<f64>>,
    /// Centroids mapped back to feature units, columns in requested order.
    /// Equal to `centroids` when no standardization was applied.
    pub feature_centroids: Vec<Vec<f64>>,
    /// Silhouette score of the winning labeling
    pub silhouette_score: f64,
    /// Score for every evaluated `k`, in evaluation order
    pub silhouette_scores_by_k: Vec<KScore>,
}

/// Per-cluster membership for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub size: usize,
    /// Indices of the rows assigned to this cluster
    pub members: Vec<usize>,
    /// Centroid in feature units
    pub centroid: Vec<f64>,
}

impl ClusterResult {
    /// Group row indices by cluster, one summary per centroid (including empty ones).
    pub fn summaries(&self) -> Vec<ClusterSummary> {
        let mut summaries: Vec<ClusterSummary> = self
            .feature_centroids
            .iter()
            .enumerate()
            .map(|(cluster, centroid)| ClusterSummary {
                cluster,
                size: 0,
                members: Vec::new(),
                centroid: centroid.clone(),
            })
            .collect();

        for (row, &label) in self.labels.iter().enumerate() {
            if let Some(summary) = summaries.get_mut(label) {
                summary.members.push(row);
                summary.size += 1;
            }
        }

        summaries
    }
}

/// Run K-Means for each candidate `k` and keep the best silhouette score.
///
/// Ties keep the first candidate seen. Data is clustered as given; use
/// [`cluster_features`] to standardize first.
pub fn select_k(data: &[Vec<f64>], config: &ClusterConfig) -> ClusterResult {
    let mut curve = Vec::with_capacity(config.k_range.len());
    let mut best: Option<(usize, f64, kmeans::KMeansFit)> = None;

    for &k in &config.k_range {
        let fit = kmeans::fit(data, k, &config.kmeans);
        let score = silhouette_score(data, &fit.labels);
        debug!(
            "[ModelSelect] k={} silhouette={:.4} iterations={}",
            k, score, fit.iterations
        );
        curve.push(KScore { k, score });

        let better = match &best {
            Some((_, best_score, _)) => score > *best_score,
            None => true,
        };
        if better {
            best = Some((k, score, fit));
        }
    }

    let Some((best_k, silhouette_score, fit)) = best else {
        return ClusterResult::default();
    };

    info!(
        "[ModelSelect] Selected k={} (silhouette {:.3}) for {} rows",
        best_k,
        silhouette_score,
        data.len()
    );

    ClusterResult {
        best_k,
        labels: fit.labels,
        feature_centroids: fit.centroids.clone(),
        centroids: fit.centroids,
        silhouette_score,
        silhouette_scores_by_k: curve,
    }
}

/// Standardize raw feature rows, select `k`, and report centroids in feature units.
///
/// Fails only when rows have differing lengths.
pub fn cluster_features(raw: &[Vec<f64>], config: &ClusterConfig) -> Result<ClusterResult> {
    check_dimensions(raw)?;

    let scaled = standardize(raw);
    let mut result = select_k(&scaled.data, config);
    result.feature_centroids = result
        .centroids
        .iter()
        .map(|c| scaled.standardizer.inverse_transform_row(c))
        .collect();

    Ok(result)
}

/// Full feature pipeline: extract, standardize, cluster with automatic `k`.
///
/// # Example
/// ```
/// use tracecluster::{cluster_activities, ActivityRecord, ClusterConfig, FeatureKey, UnitSystem};
///
/// let short = |d: f64| ActivityRecord { distance: d, moving_time: d / 3.0, ..Default::default() };
/// let long = |d: f64| ActivityRecord { distance: d, moving_time: d / 8.0, ..Default::default() };
/// let activities = vec![
///     short(5_000.0), short(5_200.0), short(4_900.0),
///     long(80_000.0), long(82_000.0), long(79_000.0),
/// ];
///
/// let result = cluster_activities(
///     &activities,
///     &[FeatureKey::Distance, FeatureKey::AverageSpeed],
///     UnitSystem::Metric,
///     &ClusterConfig { k_range: vec![2, 3], ..Default::default() },
/// ).unwrap();
///
/// assert_eq!(result.best_k, 2);
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_ne!(result.labels[0], result.labels[3]);
/// ```
pub fn cluster_activities(
    activities: &[ActivityRecord],
    keys: &[FeatureKey],
    units: UnitSystem,
    config: &ClusterConfig,
) -> Result<ClusterResult> {
    info!(
        "[ModelSelect] Clustering {} activities on [{}]",
        activities.len(),
        keys.iter()
            .map(FeatureKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let raw = extract_features(activities, keys, units);
    cluster_features(&raw, config)
}
