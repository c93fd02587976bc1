/// Weighted mean and weighted (population) standard deviation of `values`.
///
/// Pairs `values[i]` with `weights[i]`; extra elements on the longer slice are ignored.
/// Returns `(0.0, 0.0)` when there is nothing to average or the weights sum to zero.
#[inline]
pub fn weighted_mean_and_stddev(values: &[f64], weights: &[f64]) -> (f64, f64) {
    let sum_weights: f64 = weights.iter().take(values.len()).sum();
    if values.is_empty() || sum_weights == 0.0 {
        return (0.0, 0.0);
    }

    let weighted_sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    let mean = weighted_sum / sum_weights;

    let variance: f64 = values
        .iter()
        .zip(weights)
        .map(|(value, w)| {
            let diff = value - mean;
            w * diff * diff
        })
        .sum::<f64>()
        / sum_weights;

    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_weights_is_population_stddev() {
        let (mean, std) = weighted_mean_and_stddev(&[100.0, 200.0, 300.0], &[1.0, 1.0, 1.0]);
        assert!((mean - 200.0).abs() < 1e-9);
        assert!((std - (20_000.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert!((std - 81.6497).abs() < 1e-4);
    }

    #[test]
    fn test_weights_pull_the_mean() {
        let (mean, std) = weighted_mean_and_stddev(&[100.0, 200.0], &[3.0, 1.0]);
        assert!((mean - 125.0).abs() < 1e-9);
        // variance = (3*25^2 + 1*75^2) / 4 = 1875
        assert!((std - 1_875.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_weights_changes_nothing() {
        let values = [140.0, 95.0, 210.0, 180.0];
        let (m1, s1) = weighted_mean_and_stddev(&values, &[0.2, 0.4, 0.1, 0.3]);
        let (m2, s2) = weighted_mean_and_stddev(&values, &[2.0, 4.0, 1.0, 3.0]);
        assert!((m1 - m2).abs() < 1e-9);
        assert!((s1 - s2).abs() < 1e-9);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(weighted_mean_and_stddev(&[], &[]), (0.0, 0.0));
        assert_eq!(weighted_mean_and_stddev(&[120.0, 80.0], &[0.0, 0.0]), (0.0, 0.0));
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let (mean, std) = weighted_mean_and_stddev(&[321.0], &[0.01]);
        assert!((mean - 321.0).abs() < 1e-9);
        assert_eq!(std, 0.0);
    }
}
