//! Synthetic data generator for testing and benchmarking.
//!
//! Generates route sets with known repeated patterns and activity sets with
//! known behavioral groups, providing ground truth for validating pattern
//! detection and clustering.
//!
//! Feature-gated behind `synthetic`; not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use tracecluster::synthetic::RouteScenario;
//!
//! let scenario = RouteScenario {
//!     pattern_count: 2,
//!     routes_per_pattern: 4,
//!     unique_routes: 3,
//!     ..RouteScenario::default()
//! };
//!
//! let dataset = scenario.generate();
//! assert_eq!(dataset.routes.len(), 11);
//! assert_eq!(dataset.expected_patterns.len(), 2);
//! ```

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{ActivityRecord, GpsPoint};

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Point spacing along generated routes (meters).
const POINT_SPACING: f64 = 25.0;

/// Zurich origin, a representative mid-latitude for GPS calculations.
const ZURICH: GpsPoint = GpsPoint {
    latitude: 47.37,
    longitude: 8.55,
};

/// Convert meters to degrees of latitude.
fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

/// Convert meters to degrees of longitude at a given latitude.
fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

/// Move `meters` from `from` along a heading (radians, 0 = east, counter-clockwise).
fn step(from: &GpsPoint, heading: f64, meters: f64) -> GpsPoint {
    GpsPoint::new(
        from.latitude + meters_to_deg_lat(meters * heading.sin()),
        from.longitude + meters_to_deg_lng(meters * heading.cos(), from.latitude),
    )
}

/// Generate a winding polyline of the given length.
fn generate_winding(
    start: &GpsPoint,
    length_meters: f64,
    heading: f64,
    rng: &mut StdRng,
) -> Vec<GpsPoint> {
    let num_points = (length_meters / POINT_SPACING).ceil() as usize;
    let mut points = Vec::with_capacity(num_points + 1);
    let mut heading = heading;
    let mut current = *start;
    points.push(current);

    for i in 0..num_points {
        // Gentle sinusoidal base turn plus a small random wobble
        let base_turn = (i as f64 * 0.02).sin() * 0.08;
        heading += base_turn + rng.gen_range(-0.1..0.1);
        current = step(&current, heading, POINT_SPACING);
        points.push(current);
    }

    points
}

/// Add Gaussian GPS noise to a polyline.
fn add_gps_noise(points: &[GpsPoint], sigma_meters: f64, rng: &mut StdRng) -> Vec<GpsPoint> {
    if sigma_meters <= 0.0 {
        return points.to_vec();
    }

    points
        .iter()
        .map(|p| {
            // Box-Muller transform for Gaussian noise
            let u1: f64 = rng.gen_range(0.0001..1.0);
            let u2: f64 = rng.r#gen();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            let z1 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).sin();

            GpsPoint::new(
                p.latitude + meters_to_deg_lat(z0 * sigma_meters),
                p.longitude + meters_to_deg_lng(z1 * sigma_meters, p.latitude),
            )
        })
        .collect()
}

// ============================================================================
// Route Scenarios
// ============================================================================

/// Scenario configuration for generating route sets.
#[derive(Debug, Clone)]
pub struct RouteScenario {
    /// Origin around which all routes are placed.
    pub origin: GpsPoint,
    /// Number of repeated patterns.
    pub pattern_count: usize,
    /// Noisy repetitions generated per pattern.
    pub routes_per_pattern: usize,
    /// Routes that repeat nothing.
    pub unique_routes: usize,
    /// Length of each route in meters.
    pub route_length_meters: f64,
    /// GPS noise standard deviation in meters.
    pub gps_noise_sigma_meters: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for RouteScenario {
    fn default() -> Self {
        Self {
            origin: ZURICH,
            pattern_count: 3,
            routes_per_pattern: 5,
            unique_routes: 5,
            route_length_meters: 8_000.0,
            gps_noise_sigma_meters: 3.0,
            seed: 42,
        }
    }
}

/// A generated route set with ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticRouteSet {
    /// Generated routes, patterns first (grouped), then unique routes.
    pub routes: Vec<Vec<GpsPoint>>,
    /// Route indices of each pattern.
    pub expected_patterns: Vec<Vec<usize>>,
    /// Route indices of the unique routes.
    pub expected_unique: Vec<usize>,
}

impl RouteScenario {
    /// Generate a route set from this scenario.
    pub fn generate(&self) -> SyntheticRouteSet {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut routes = Vec::new();
        let mut expected_patterns = Vec::with_capacity(self.pattern_count);
        let mut expected_unique = Vec::with_capacity(self.unique_routes);

        // Spread patterns and unique routes around the origin so their
        // endpoints are far apart (well beyond the location saturation).
        let total_slots = (self.pattern_count + self.unique_routes).max(1);

        for p in 0..self.pattern_count {
            let start = slot_start(&self.origin, p, total_slots);
            let heading = rng.gen_range(0.0..(2.0 * PI));
            let template = generate_winding(&start, self.route_length_meters, heading, &mut rng);

            let mut members = Vec::with_capacity(self.routes_per_pattern);
            for _ in 0..self.routes_per_pattern {
                members.push(routes.len());
                routes.push(add_gps_noise(&template, self.gps_noise_sigma_meters, &mut rng));
            }
            expected_patterns.push(members);
        }

        for u in 0..self.unique_routes {
            let start = slot_start(&self.origin, self.pattern_count + u, total_slots);
            let heading = rng.gen_range(0.0..(2.0 * PI));
            let length = self.route_length_meters * rng.gen_range(0.5..1.5);
            let route = generate_winding(&start, length, heading, &mut rng);
            expected_unique.push(routes.len());
            routes.push(add_gps_noise(&route, self.gps_noise_sigma_meters, &mut rng));
        }

        SyntheticRouteSet {
            routes,
            expected_patterns,
            expected_unique,
        }
    }

    /// 3 patterns x 5 repetitions plus 5 unique routes.
    pub fn small() -> Self {
        Self::default()
    }

    /// 10 patterns x 20 repetitions plus 100 unique routes (300 routes).
    pub fn large() -> Self {
        Self {
            pattern_count: 10,
            routes_per_pattern: 20,
            unique_routes: 100,
            seed: 43,
            ..Self::default()
        }
    }
}

/// Start point for slot `index` of `total` on a ring around `origin`.
///
/// The ring grows with `total` so neighboring slots stay ~12km apart.
fn slot_start(origin: &GpsPoint, index: usize, total: usize) -> GpsPoint {
    let angle = 2.0 * PI * index as f64 / total as f64;
    let radius = (total as f64 * 2_000.0).max(30_000.0);
    step(origin, angle, radius)
}

// ============================================================================
// Activity Scenarios
// ============================================================================

/// Center of one behavioral group of activities (SI units).
#[derive(Debug, Clone, Copy)]
pub struct ActivityProfile {
    pub distance_m: f64,
    pub moving_time_s: f64,
    pub elevation_gain_m: f64,
    pub max_speed_mps: f64,
}

/// Scenario configuration for generating activity records.
#[derive(Debug, Clone)]
pub struct ActivityScenario {
    /// Group centers.
    pub profiles: Vec<ActivityProfile>,
    /// Activities generated per profile.
    pub per_profile: usize,
    /// Relative jitter applied to every attribute (0.05 = ±5%).
    pub jitter: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for ActivityScenario {
    fn default() -> Self {
        Self {
            profiles: vec![
                // Short easy run
                ActivityProfile {
                    distance_m: 5_000.0,
                    moving_time_s: 1_800.0,
                    elevation_gain_m: 20.0,
                    max_speed_mps: 4.0,
                },
                // Long flat ride
                ActivityProfile {
                    distance_m: 80_000.0,
                    moving_time_s: 10_800.0,
                    elevation_gain_m: 300.0,
                    max_speed_mps: 15.0,
                },
                // Mountain ride
                ActivityProfile {
                    distance_m: 45_000.0,
                    moving_time_s: 9_000.0,
                    elevation_gain_m: 1_800.0,
                    max_speed_mps: 20.0,
                },
            ],
            per_profile: 20,
            jitter: 0.05,
            seed: 42,
        }
    }
}

impl ActivityScenario {
    /// Generate activities grouped by profile, with the profile index of each.
    pub fn generate(&self) -> (Vec<ActivityRecord>, Vec<usize>) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut activities = Vec::with_capacity(self.profiles.len() * self.per_profile);
        let mut groups = Vec::with_capacity(activities.capacity());

        for (g, profile) in self.profiles.iter().enumerate() {
            for i in 0..self.per_profile {
                let mut jitter = |value: f64| {
                    if self.jitter <= 0.0 {
                        value
                    } else {
                        value * (1.0 + rng.gen_range(-self.jitter..self.jitter))
                    }
                };
                activities.push(ActivityRecord {
                    id: format!("synth_{}_{:03}", g, i),
                    distance: jitter(profile.distance_m),
                    moving_time: jitter(profile.moving_time_s),
                    total_elevation_gain: jitter(profile.elevation_gain_m),
                    average_speed: None,
                    max_speed: Some(jitter(profile.max_speed_mps)),
                });
                groups.push(g);
            }
        }

        (activities, groups)
    }
}
