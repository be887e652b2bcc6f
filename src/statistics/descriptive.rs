//! Descriptive statistics.

use crate::error::AnalysisError;

/// Arithmetic mean.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn mean(values: &[f64]) -> f64 {
    assert!(!values.is_empty(), "cannot average an empty slice");
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with Bessel's correction (divisor n − 1).
///
/// # Panics
///
/// Panics if `values` holds fewer than two samples.
pub fn sample_std(values: &[f64]) -> f64 {
    assert!(
        values.len() >= 2,
        "sample standard deviation requires at least two samples"
    );
    let m = mean(values);
    let ss: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Percent change of the post mean relative to the pre mean.
///
/// # Errors
///
/// `DegenerateBaseline` when the pre mean is zero; embedded table passes
/// render the value as undefined instead of aborting.
pub fn percent_change(pre_mean: f64, post_mean: f64) -> Result<f64, AnalysisError> {
    if pre_mean == 0.0 {
        return Err(AnalysisError::DegenerateBaseline);
    }
    Ok(100.0 * (post_mean - pre_mean) / pre_mean)
}
