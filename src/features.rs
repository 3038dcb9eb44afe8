//! Feature extraction for activity clustering.
//!
//! Maps a caller-chosen, ordered list of [`FeatureKey`]s onto one numeric
//! vector per activity, converting raw SI measurements into display units.
//! The output column order always matches the requested key order so that
//! centroids can be re-displayed per feature after clustering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_METER: f64 = 3.280_84;
const MPH_PER_MPS: f64 = 2.236_936;
const KMH_PER_MPS: f64 = 3.6;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Raw activity attributes as supplied by the data source (SI units).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Activity identifier (opaque to the engine)
    #[serde(default)]
    pub id: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: f64,
    /// Total elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Average speed in m/s (derived from distance / moving time when absent)
    #[serde(default)]
    pub average_speed: Option<f64>,
    /// Maximum speed in m/s (treated as 0 when absent)
    #[serde(default)]
    pub max_speed: Option<f64>,
}

impl ActivityRecord {
    /// Average speed in m/s, falling back to `distance / moving_time`.
    pub fn average_speed_mps(&self) -> f64 {
        match self.average_speed {
            Some(speed) => speed,
            None if self.moving_time > 0.0 => self.distance / self.moving_time,
            None => 0.0,
        }
    }
}

/// Measurement system used for feature values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Miles, mph, feet, hours
    #[default]
    Imperial,
    /// Kilometers, km/h, meters, hours
    Metric,
}

/// A clusterable activity attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    Distance,
    AverageSpeed,
    ElevationGain,
    MovingTime,
    MaxSpeed,
}

impl FeatureKey {
    /// All supported features, in canonical order.
    pub const ALL: [FeatureKey; 5] = [
        FeatureKey::Distance,
        FeatureKey::AverageSpeed,
        FeatureKey::ElevationGain,
        FeatureKey::MovingTime,
        FeatureKey::MaxSpeed,
    ];

    /// Snake-case key, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Distance => "distance",
            FeatureKey::AverageSpeed => "average_speed",
            FeatureKey::ElevationGain => "elevation_gain",
            FeatureKey::MovingTime => "moving_time",
            FeatureKey::MaxSpeed => "max_speed",
        }
    }

    /// Human-readable label for axis titles.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKey::Distance => "Distance",
            FeatureKey::AverageSpeed => "Average Speed",
            FeatureKey::ElevationGain => "Elevation Gain",
            FeatureKey::MovingTime => "Moving Time",
            FeatureKey::MaxSpeed => "Max Speed",
        }
    }

    /// Unit suffix for values produced in the given system.
    pub fn unit(&self, units: UnitSystem) -> &'static str {
        match (self, units) {
            (FeatureKey::Distance, UnitSystem::Imperial) => "mi",
            (FeatureKey::Distance, UnitSystem::Metric) => "km",
            (FeatureKey::AverageSpeed | FeatureKey::MaxSpeed, UnitSystem::Imperial) => "mph",
            (FeatureKey::AverageSpeed | FeatureKey::MaxSpeed, UnitSystem::Metric) => "km/h",
            (FeatureKey::ElevationGain, UnitSystem::Imperial) => "ft",
            (FeatureKey::ElevationGain, UnitSystem::Metric) => "m",
            (FeatureKey::MovingTime, _) => "h",
        }
    }

    /// Extract this feature from an activity, converted into `units`.
    pub fn value(&self, activity: &ActivityRecord, units: UnitSystem) -> f64 {
        match self {
            FeatureKey::Distance => match units {
                UnitSystem::Imperial => activity.distance / METERS_PER_MILE,
                UnitSystem::Metric => activity.distance / 1000.0,
            },
            FeatureKey::AverageSpeed => convert_speed(activity.average_speed_mps(), units),
            FeatureKey::ElevationGain => match units {
                UnitSystem::Imperial => activity.total_elevation_gain * FEET_PER_METER,
                UnitSystem::Metric => activity.total_elevation_gain,
            },
            FeatureKey::MovingTime => activity.moving_time / SECONDS_PER_HOUR,
            FeatureKey::MaxSpeed => convert_speed(activity.max_speed.unwrap_or(0.0), units),
        }
    }
}

fn convert_speed(mps: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => mps * MPH_PER_MPS,
        UnitSystem::Metric => mps * KMH_PER_MPS,
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(FeatureKey::Distance),
            "average_speed" | "avg_speed" => Ok(FeatureKey::AverageSpeed),
            "elevation_gain" | "total_elevation_gain" | "elevation" => {
                Ok(FeatureKey::ElevationGain)
            }
            "moving_time" | "time" => Ok(FeatureKey::MovingTime),
            "max_speed" => Ok(FeatureKey::MaxSpeed),
            other => Err(ClusterError::UnknownFeature(other.to_string())),
        }
    }
}

/// Parse a comma-separated feature list such as `"distance,average_speed"`.
pub fn parse_feature_keys(list: &str) -> Result<Vec<FeatureKey>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(FeatureKey::from_str)
        .collect()
}

/// Build one feature vector per activity, columns in `keys` order.
///
/// # Example
/// ```
/// use tracecluster::{ActivityRecord, FeatureKey, UnitSystem, extract_features};
///
/// let ride = ActivityRecord {
///     distance: 16_093.44,
///     moving_time: 3600.0,
///     ..Default::default()
/// };
/// let rows = extract_features(
///     &[ride],
///     &[FeatureKey::Distance, FeatureKey::AverageSpeed],
///     UnitSystem::Imperial,
/// );
/// assert!((rows[0][0] - 10.0).abs() < 1e-9);
/// assert!((rows[0][1] - 10.0).abs() < 1e-3);
/// ```
pub fn extract_features(
    activities: &[ActivityRecord],
    keys: &[FeatureKey],
    units: UnitSystem,
) -> Vec<Vec<f64>> {
    activities
        .iter()
        .map(|activity| keys.iter().map(|key| key.value(activity, units)).collect())
        .collect()
}
