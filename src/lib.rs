//! # Trace Cluster
//!
//! Unsupervised analysis engine for fitness activities.
//!
//! This library provides:
//! - Activity clustering with K-Means (k-means++ seeding, deterministic RNG)
//! - Automatic model-order selection using the silhouette score
//! - Repeated-route detection from bearing-shape signatures
//! - Density-based clustering (DBSCAN) over a precomputed similarity matrix
//!
//! The engine consumes plain feature vectors or coordinate sequences and
//! returns label assignments plus quality metrics. It knows nothing about
//! rendering, authentication or network I/O.
//!
//! ## Features
//!
//! - **`parallel`** - Build the route similarity matrix in parallel with rayon
//! - **`synthetic`** - Deterministic synthetic activities and routes for testing
//! - **`cli`** - Debug command line tool (`tracecluster-cli`)
//!
//! ## Quick Start
//!
//! ```rust
//! use tracecluster::{select_k, ClusterConfig};
//!
//! let data = vec![
//!     vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0],
//!     vec![10.0, 10.0], vec![10.0, 11.0], vec![11.0, 10.0],
//! ];
//!
//! let config = ClusterConfig { k_range: vec![2, 3], ..ClusterConfig::default() };
//! let result = select_k(&data, &config);
//! assert_eq!(result.best_k, 2);
//! assert!(result.silhouette_score > 0.5);
//! ```
//!
//! Route patterns:
//!
//! ```rust
//! use tracecluster::{find_route_patterns, GpsPoint, PatternConfig};
//!
//! let route: Vec<GpsPoint> = (0..20)
//!     .map(|i| GpsPoint::new(51.5074 + i as f64 * 0.001, -0.1278 + i as f64 * 0.0005))
//!     .collect();
//!
//! let result = find_route_patterns(&[route.clone(), route], &PatternConfig::default());
//! assert_eq!(result.pattern_count, 1);
//! assert_eq!(result.labels, vec![0, 0]);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ClusterError, OptionExt, Result};

// Deterministic linear-congruential generator
pub mod rng;
pub use rng::SeededRng;

// Geographic utilities (haversine, bearings, bounds)
pub mod geo_utils;

// Feature clustering pipeline
pub mod features;
pub use features::{
    ActivityRecord, FeatureKey, UnitSystem, extract_features, parse_feature_keys,
};

pub mod standardize;
pub use standardize::{StandardizedDataset, Standardizer, standardize};

pub mod kmeans;
pub use kmeans::{KMeansConfig, KMeansFit};

pub mod silhouette;
pub use silhouette::{silhouette_samples, silhouette_score};

pub mod model_selection;
pub use model_selection::{
    ClusterConfig, ClusterResult, ClusterSummary, KScore, cluster_activities, cluster_features,
    select_k,
};

// Route pattern pipeline
pub mod signature;
pub use signature::{RouteSignature, SignatureConfig};

pub mod comparison;
pub use comparison::{ComparisonConfig, DistanceMatrix, compare_signatures, similarity_matrix};
#[cfg(feature = "parallel")]
pub use comparison::similarity_matrix_parallel;

pub mod dbscan;
pub use dbscan::{NOISE, dbscan};

pub mod patterns;
pub use patterns::{
    PatternConfig, RouteMatchResult, RoutePattern, find_route_patterns, match_signatures,
};

// Label -> color index lookup for renderers
pub mod palette;
pub use palette::{ColorPalette, color_index};

// Synthetic data for tests and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use tracecluster::GpsPoint;
/// let point = GpsPoint::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Degenerate bounds around a single point.
    pub fn point(p: GpsPoint) -> Self {
        Self {
            min_lat: p.latitude,
            max_lat: p.latitude,
            min_lng: p.longitude,
            max_lng: p.longitude,
        }
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}
