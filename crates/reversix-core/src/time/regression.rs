//! Least-squares helpers for the predictive time strategy.

/// Arithmetic mean. Zero for an empty slice is never needed here;
/// callers guarantee at least one value.
pub fn arithmetic_mean(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty());

    values.iter().sum::<f64>() / values.len() as f64
}

/// Covariance of two paired value sets with known means.
pub fn covariance(xs: &[f64], x_mean: f64, ys: &[f64], y_mean: f64) -> f64 {
    let mut sum = 0.0;
    let mut n = 0u32;

    for (x, y) in xs.iter().zip(ys) {
        sum += x * y;
        n += 1;
    }

    sum / f64::from(n) - x_mean * y_mean
}

/// Variance of a value set with known mean.
pub fn variance(values: &[f64], mean: f64) -> f64 {
    covariance(values, mean, values, mean)
}

/// Least-squares coefficients `(a, b)` for `f(x) = a + b * x`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.len() >= 2);

    let x_mean = arithmetic_mean(xs);
    let y_mean = arithmetic_mean(ys);

    let b = covariance(xs, x_mean, ys, y_mean) / variance(xs, x_mean);
    let a = y_mean - b * x_mean;

    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_constants() {
        assert_eq!(arithmetic_mean(&[3.0, 3.0, 3.0]), 3.0);
    }

    #[test]
    fn regression_recovers_an_exact_line() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [5.0, 7.0, 9.0, 11.0];

        let (a, b) = linear_regression(&xs, &ys);

        assert!((a - 3.0).abs() < 1e-9);
        assert!((b - 2.0).abs() < 1e-9);
    }

    #[test]
    fn regression_fits_noisy_data_between_the_extremes() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 2.0];

        let (_, b) = linear_regression(&xs, &ys);

        assert!(b > 0.0 && b < 2.0);
    }

    #[test]
    fn variance_of_constants_is_zero() {
        let values = [2.0, 2.0, 2.0];
        assert!(variance(&values, 2.0).abs() < 1e-12);
    }
}
