//! Z-score standardization of feature columns.
//!
//! Columns with zero variance map to 0 for every row instead of `NaN`.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Per-column mean and population standard deviation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
}

impl Standardizer {
    /// Compute column statistics over an `n x d` dataset.
    ///
    /// `d` is taken from the first row; an empty dataset yields an empty standardizer.
    pub fn fit(data: &[Vec<f64>]) -> Self {
        let Some(first) = data.first() else {
            return Self::default();
        };
        let dims = first.len();
        let n = data.len() as f64;

        let mut means = vec![0.0; dims];
        for row in data {
            for (sum, value) in means.iter_mut().zip(row) {
                *sum += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut variances = vec![0.0; dims];
        for row in data {
            for ((acc, value), mean) in variances.iter_mut().zip(row).zip(&means) {
                *acc += (value - mean).powi(2);
            }
        }
        let std_devs = variances.into_iter().map(|v| (v / n).sqrt()).collect();

        Self { means, std_devs }
    }

    /// Number of columns this standardizer was fitted on.
    pub fn dims(&self) -> usize {
        self.means.len()
    }

    /// Z-score a single row.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(value, (mean, std))| {
                if *std == 0.0 {
                    0.0
                } else {
                    (value - mean) / std
                }
            })
            .collect()
    }

    /// Z-score every row.
    pub fn transform(&self, data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        data.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Map a standardized row back into the original feature units.
    ///
    /// Zero-variance columns map back to the column mean.
    pub fn inverse_transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(z, (mean, std))| z * std + mean)
            .collect()
    }
}

/// A dataset after z-score normalization, with the statistics used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardizedDataset {
    pub data: Vec<Vec<f64>>,
    pub standardizer: Standardizer,
}

impl StandardizedDataset {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Standardize an `n x d` dataset column-wise.
///
/// # Example
/// ```
/// use tracecluster::standardize;
///
/// let scaled = standardize(&[vec![1.0, 5.0], vec![3.0, 5.0]]);
/// assert_eq!(scaled.data, vec![vec![-1.0, 0.0], vec![1.0, 0.0]]);
/// ```
pub fn standardize(data: &[Vec<f64>]) -> StandardizedDataset {
    let standardizer = Standardizer::fit(data);
    StandardizedDataset {
        data: standardizer.transform(data),
        standardizer,
    }
}

/// Verify every row has the same length as the first one, returning that length.
pub fn check_dimensions(data: &[Vec<f64>]) -> Result<usize> {
    let expected = data.first().map_or(0, Vec::len);
    for (row, values) in data.iter().enumerate() {
        if values.len() != expected {
            return Err(ClusterError::DimensionMismatch {
                row,
                expected,
                found: values.len(),
            });
        }
    }
    Ok(expected)
}
