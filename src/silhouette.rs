//! Silhouette coefficient for evaluating a label assignment.

use crate::kmeans::euclidean;

/// Per-point silhouette coefficients.
///
/// For point `i`, `a(i)` is the mean distance to the other members of its own
/// cluster (0 for a singleton) and `b(i)` is the smallest mean distance to the
/// members of any other non-empty cluster. The coefficient is
/// `(b - a) / max(a, b)`, or 0 when both are 0.
///
/// Every coefficient is 0 when fewer than two clusters are populated.
pub fn silhouette_samples(data: &[Vec<f64>], labels: &[usize]) -> Vec<f64> {
    let n = data.len().min(labels.len());
    let k = labels[..n].iter().max().map_or(0, |&m| m + 1);

    let mut sizes = vec![0usize; k];
    for &label in &labels[..n] {
        sizes[label] += 1;
    }
    if sizes.iter().filter(|&&s| s > 0).count() < 2 {
        return vec![0.0; n];
    }

    let mut scores = Vec::with_capacity(n);
    let mut sums = vec![0.0; k];
    for i in 0..n {
        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if i != j {
                sums[labels[j]] += euclidean(&data[i], &data[j]);
            }
        }

        let own = labels[i];
        let a = if sizes[own] > 1 {
            sums[own] / (sizes[own] - 1) as f64
        } else {
            0.0
        };
        let b = (0..k)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        scores.push(if denom > 0.0 { (b - a) / denom } else { 0.0 });
    }

    scores
}

/// Mean silhouette coefficient over all points, in `[-1, 1]`.
///
/// Returns 0 for an empty dataset or a single-cluster labeling.
///
/// # Example
/// ```
/// use tracecluster::silhouette_score;
///
/// let data = vec![vec![0.0], vec![0.1], vec![5.0], vec![5.1]];
/// assert!(silhouette_score(&data, &[0, 0, 1, 1]) > 0.9);
/// assert_eq!(silhouette_score(&data, &[0, 0, 0, 0]), 0.0);
/// ```
pub fn silhouette_score(data: &[Vec<f64>], labels: &[usize]) -> f64 {
    let samples = silhouette_samples(data, labels);
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
