//! Bearing-shape route signatures.
//!
//! A signature summarizes a GPS track as the sequence of compass bearings
//! between consecutive down-sampled points, plus its length and endpoints.
//! Down-sampling bounds the cost of later pairwise comparison regardless of
//! how densely the original track was recorded.

use serde::{Deserialize, Serialize};

use crate::error::{OptionExt, Result};
use crate::geo_utils::{cumulative_distances, initial_bearing};
use crate::{Bounds, GpsPoint};

/// Configuration for signature construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Maximum number of sampled points kept from a track. Default: 50
    pub max_sample_points: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            max_sample_points: 50,
        }
    }
}

/// Shape summary of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSignature {
    /// Initial bearing (degrees, `[0, 360)`) of each sampled segment
    pub bearings: Vec<f64>,
    /// Distance from the start to the end of each sampled segment, in meters
    pub cumulative_distances: Vec<f64>,
    /// Total sampled route distance in meters
    pub total_distance: f64,
    /// First point of the route
    pub start_point: GpsPoint,
    /// Last point of the route
    pub end_point: GpsPoint,
    /// Bounding box of the sampled points
    pub bounds: Bounds,
    /// Center of the bounding box
    pub center: GpsPoint,
}

impl RouteSignature {
    /// Build a signature from an ordered coordinate sequence.
    ///
    /// Invalid coordinates are dropped first. With fewer than two usable
    /// points the signature is empty: no bearings, zero distance, and start
    /// and end collapsed onto the single point (or `(0, 0)`).
    ///
    /// # Example
    /// ```
    /// use tracecluster::{GpsPoint, RouteSignature, SignatureConfig};
    ///
    /// let points = vec![
    ///     GpsPoint::new(51.5074, -0.1278),
    ///     GpsPoint::new(51.5084, -0.1278),
    ///     GpsPoint::new(51.5084, -0.1268),
    /// ];
    /// let sig = RouteSignature::from_points(&points, &SignatureConfig::default());
    /// assert_eq!(sig.bearings.len(), 2);
    /// assert!(sig.bearings[0] < 1.0); // due north
    /// assert!((sig.bearings[1] - 90.0).abs() < 1.0); // due east
    /// ```
    pub fn from_points(points: &[GpsPoint], config: &SignatureConfig) -> Self {
        let valid: Vec<GpsPoint> = points.iter().filter(|p| p.is_valid()).copied().collect();

        if valid.len() < 2 {
            let point = valid.first().copied().unwrap_or_default();
            return Self::empty(point);
        }

        let sampled = downsample(&valid, config.max_sample_points);

        let bearings: Vec<f64> = sampled
            .windows(2)
            .map(|pair| initial_bearing(&pair[0], &pair[1]))
            .collect();

        // Drop the leading 0 so entry i is the distance at the end of segment i
        let mut distances = cumulative_distances(&sampled);
        distances.remove(0);
        let total_distance = distances.last().copied().unwrap_or(0.0);

        let bounds = Bounds::from_points(&sampled).unwrap_or_else(|| Bounds::point(sampled[0]));

        Self {
            bearings,
            cumulative_distances: distances,
            total_distance,
            start_point: sampled[0],
            end_point: sampled[sampled.len() - 1],
            center: bounds.center(),
            bounds,
        }
    }

    /// Like [`from_points`](Self::from_points), but fails on degenerate input.
    ///
    /// `route_index` is only used to identify the route in the error.
    pub fn try_from_points(
        route_index: usize,
        points: &[GpsPoint],
        config: &SignatureConfig,
    ) -> Result<Self> {
        Some(Self::from_points(points, config))
            .filter(|sig| !sig.is_empty())
            .ok_or_insufficient_points(route_index, points.len(), 2)
    }

    /// True if the signature carries no bearings.
    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }

    fn empty(point: GpsPoint) -> Self {
        Self {
            bearings: Vec::new(),
            cumulative_distances: Vec::new(),
            total_distance: 0.0,
            start_point: point,
            end_point: point,
            bounds: Bounds::point(point),
            center: point,
        }
    }
}

/// Uniform-stride down-sampling to at most `max_points`, always keeping the last point.
///
/// The stride is `ceil((n - 1) / (max_points - 1))`, so even when the final
/// point falls between strides and is appended, the result never exceeds
/// `max_points`.
pub fn downsample(points: &[GpsPoint], max_points: usize) -> Vec<GpsPoint> {
    let max_points = max_points.max(2);
    if points.len() <= max_points {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let stride = last.div_ceil(max_points - 1);

    let mut sampled: Vec<GpsPoint> = points.iter().step_by(stride).copied().collect();
    if last % stride != 0 {
        sampled.push(points[last]);
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<GpsPoint> {
        (0..n)
            .map(|i| GpsPoint::new(45.0 + i as f64 * 0.0001, 7.0))
            .collect()
    }

    #[test]
    fn test_downsample_bounds_point_count() {
        for n in [2, 49, 50, 51, 99, 100, 101, 1000, 1234] {
            let pts = line(n);
            let sampled = downsample(&pts, 50);
            assert!(sampled.len() <= 50, "n={} gave {}", n, sampled.len());
            assert_eq!(sampled.last(), pts.last());
            assert_eq!(sampled.first(), pts.first());
        }
    }

    #[test]
    fn test_downsample_keeps_short_tracks() {
        let pts = line(10);
        assert_eq!(downsample(&pts, 50), pts);
    }
}
