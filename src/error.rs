//! Unified error handling.
//!
//! The clustering algorithms themselves are infallible: degenerate input
//! produces neutral output (empty labels, zero scores). Errors are reserved
//! for malformed calls such as ragged feature rows or unknown feature keys.

use thiserror::Error;

/// Errors produced by the clustering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// A feature row does not have the same length as the first row.
    #[error("row {row} has {found} features, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A feature key string did not name a known feature.
    #[error("unknown feature key '{0}'")]
    UnknownFeature(String),

    /// A route had too few points to build a signature.
    #[error("route {route_index} has {point_count} points, at least {minimum_required} required")]
    InsufficientPoints {
        route_index: usize,
        point_count: usize,
        minimum_required: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Convenience conversions from `Option` into crate errors.
pub trait OptionExt<T> {
    /// Convert `None` into [`ClusterError::InsufficientPoints`].
    fn ok_or_insufficient_points(
        self,
        route_index: usize,
        point_count: usize,
        minimum_required: usize,
    ) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_insufficient_points(
        self,
        route_index: usize,
        point_count: usize,
        minimum_required: usize,
    ) -> Result<T> {
        self.ok_or(ClusterError::InsufficientPoints {
            route_index,
            point_count,
            minimum_required,
        })
    }
}
