//! Tests for standardize module

use tracecluster::standardize::check_dimensions;
use tracecluster::{ClusterError, Standardizer, standardize};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn sample() -> Vec<Vec<f64>> {
    vec![
        vec![5.0, 120.0, 3.0],
        vec![12.0, 80.0, 3.0],
        vec![8.5, 200.0, 3.0],
        vec![30.0, 95.0, 3.0],
        vec![1.0, 150.0, 3.0],
    ]
}

#[test]
fn test_columns_have_zero_mean_unit_std() {
    let scaled = standardize(&sample());
    let n = scaled.len() as f64;

    for col in 0..2 {
        let mean: f64 = scaled.data.iter().map(|r| r[col]).sum::<f64>() / n;
        let var: f64 = scaled.data.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
        assert!(approx_eq(mean, 0.0, 1e-9), "col {} mean {}", col, mean);
        assert!(approx_eq(var.sqrt(), 1.0, 1e-9), "col {} std {}", col, var.sqrt());
    }
}

#[test]
fn test_zero_variance_column_maps_to_zero() {
    let scaled = standardize(&sample());
    assert!(scaled.data.iter().all(|r| r[2] == 0.0));
    assert_eq!(scaled.standardizer.std_devs[2], 0.0);
    assert_eq!(scaled.standardizer.means[2], 3.0);
}

#[test]
fn test_population_std_dev() {
    let standardizer = Standardizer::fit(&[vec![2.0], vec![4.0], vec![4.0], vec![4.0]]);
    assert!(approx_eq(standardizer.means[0], 3.5, 1e-12));
    // population variance = (2.25 + 3 * 0.25) / 4 = 0.75
    assert!(approx_eq(standardizer.std_devs[0], 0.75_f64.sqrt(), 1e-12));
}

#[test]
fn test_inverse_transform_restores_row() {
    let data = sample();
    let scaled = standardize(&data);
    let restored = scaled.standardizer.inverse_transform_row(&scaled.data[3]);
    for (a, b) in restored.iter().zip(&data[3]) {
        assert!(approx_eq(*a, *b, 1e-9));
    }
}

#[test]
fn test_empty_dataset() {
    let scaled = standardize(&[]);
    assert!(scaled.is_empty());
    assert_eq!(scaled.standardizer.dims(), 0);
}

#[test]
fn test_single_row_is_all_zeros() {
    let scaled = standardize(&[vec![4.0, -2.0]]);
    assert_eq!(scaled.data, vec![vec![0.0, 0.0]]);
}

#[test]
fn test_check_dimensions() {
    assert_eq!(check_dimensions(&sample()), Ok(3));
    assert_eq!(check_dimensions(&[]), Ok(0));
    assert_eq!(
        check_dimensions(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]),
        Err(ClusterError::DimensionMismatch {
            row: 2,
            expected: 2,
            found: 1,
        })
    );
}
