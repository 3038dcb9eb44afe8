//! Repeated-route detection.
//!
//! Routes are reduced to bearing signatures, compared pairwise, and the
//! resulting dissimilarity matrix is clustered with DBSCAN. Each discovered
//! cluster is a route pattern; routes that fit no pattern are unique.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::GpsPoint;
use crate::comparison::{ComparisonConfig, DistanceMatrix};
use crate::dbscan::{NOISE, cluster_count, dbscan, noise_count};
use crate::signature::{RouteSignature, SignatureConfig};

#[cfg(feature = "parallel")]
use crate::comparison::similarity_matrix_parallel as build_matrix;

#[cfg(not(feature = "parallel"))]
use crate::comparison::similarity_matrix as build_matrix;

/// Configuration for pattern detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Maximum dissimilarity for two routes to be neighbors. Default: 0.25
    pub eps: f64,
    /// Minimum neighborhood size (self included) for a core route. Default: 2
    pub min_samples: usize,
    /// Return the similarity matrix in the result. Default: false
    pub include_matrix: bool,
    pub signature: SignatureConfig,
    pub comparison: ComparisonConfig,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            eps: 0.25,
            min_samples: 2,
            include_matrix: false,
            signature: SignatureConfig::default(),
            comparison: ComparisonConfig::default(),
        }
    }
}

/// Pattern labels for a set of routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMatchResult {
    /// Pattern id per route, or `-1` for a unique route
    pub labels: Vec<i32>,
    /// Number of distinct patterns
    pub pattern_count: usize,
    /// Number of routes that belong to no pattern
    pub unique_route_count: usize,
    /// Pairwise dissimilarity scores, if requested
    pub similarity_matrix: Option<DistanceMatrix>,
}

/// The routes that make up one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    pub id: usize,
    pub route_indices: Vec<usize>,
}

impl RouteMatchResult {
    /// Build a result from DBSCAN labels.
    pub fn from_labels(labels: Vec<i32>, similarity_matrix: Option<DistanceMatrix>) -> Self {
        Self {
            pattern_count: cluster_count(&labels),
            unique_route_count: noise_count(&labels),
            labels,
            similarity_matrix,
        }
    }

    /// Routes grouped by pattern, ordered by pattern id.
    pub fn patterns(&self) -> Vec<RoutePattern> {
        let mut patterns: Vec<RoutePattern> = (0..self.pattern_count)
            .map(|id| RoutePattern {
                id,
                route_indices: Vec::new(),
            })
            .collect();

        for (route, &label) in self.labels.iter().enumerate() {
            if label >= 0 {
                patterns[label as usize].route_indices.push(route);
            }
        }

        patterns
    }

    /// Indices of routes that belong to no pattern.
    pub fn unique_routes(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == NOISE)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Detect repeated routes among raw coordinate sequences.
///
/// Signatures are rebuilt on every call. Routes with fewer than two points get
/// an empty signature, which is maximally dissimilar to everything and so
/// always ends up unique.
pub fn find_route_patterns(
    routes: &[Vec<GpsPoint>],
    config: &PatternConfig,
) -> RouteMatchResult {
    let signatures: Vec<RouteSignature> = routes
        .iter()
        .map(|points| RouteSignature::from_points(points, &config.signature))
        .collect();

    let degenerate = signatures.iter().filter(|s| s.is_empty()).count();
    if degenerate > 0 {
        debug!(
            "[Patterns] {} of {} routes have fewer than 2 points",
            degenerate,
            routes.len()
        );
    }

    match_signatures(&signatures, config)
}

/// Detect repeated routes among prebuilt signatures.
pub fn match_signatures(
    signatures: &[RouteSignature],
    config: &PatternConfig,
) -> RouteMatchResult {
    let matrix = build_matrix(signatures, &config.comparison);
    let labels = dbscan(&matrix, config.eps, config.min_samples);

    let result = RouteMatchResult::from_labels(
        labels,
        if config.include_matrix {
            Some(matrix)
        } else {
            None
        },
    );

    info!(
        "[Patterns] {} routes -> {} patterns, {} unique (eps={}, min_samples={})",
        signatures.len(),
        result.pattern_count,
        result.unique_route_count,
        config.eps,
        config.min_samples
    );

    result
}
