//! Dependent-samples t-test over matched pre/post values.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::AnalysisError;
use crate::extraction::TmgParam;
use crate::result::ScalarStatResult;

use super::descriptive::{mean, percent_change, sample_std};

/// Paired t-statistic and degrees of freedom for matched samples.
///
/// Computes `t = mean(d) / (std(d) / sqrt(n))` over the per-unit
/// differences `d_i = post_i − pre_i`, with Bessel-corrected `std(d)`.
/// When every difference is identical (`std(d) = 0`) the statistic is
/// undefined and NaN is returned; callers propagate it rather than
/// failing the surrounding table pass.
///
/// # Errors
///
/// `InvalidSignal` on length mismatch, `InsufficientSample` for n < 2.
pub fn paired_t_statistic(pre: &[f64], post: &[f64]) -> Result<(f64, f64), AnalysisError> {
    if pre.len() != post.len() {
        return Err(AnalysisError::InvalidSignal(format!(
            "paired samples differ in length: {} vs {}",
            pre.len(),
            post.len()
        )));
    }
    let n = pre.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientSample {
            required: 2,
            actual: n,
        });
    }

    let diffs: Vec<f64> = post.iter().zip(pre.iter()).map(|(b, a)| b - a).collect();
    let mean_d = mean(&diffs);
    let std_d = sample_std(&diffs);
    let df = (n - 1) as f64;

    if std_d == 0.0 {
        return Ok((f64::NAN, df));
    }

    let t = mean_d / (std_d / (n as f64).sqrt());
    Ok((t, df))
}

/// Two-sided p-value of a t-statistic under Student's t with `df`
/// degrees of freedom.
///
/// NaN statistics propagate to a NaN p-value.
pub fn two_sided_p_value(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    let dist = StudentsT::new(0.0, 1.0, df).expect("degrees of freedom must be positive");
    2.0 * dist.sf(t.abs())
}

/// Compare matched pre/post values of one parameter.
///
/// Produces the full per-parameter table row: descriptive statistics for
/// both phases, percent change (undefined on a zero baseline), and the
/// paired test. This is the embedded table pass, so a degenerate
/// baseline is recorded as an absent percent change rather than an
/// error.
///
/// # Errors
///
/// `InvalidSignal` on length mismatch, `InsufficientSample` for n < 2.
pub fn paired_compare(
    parameter: TmgParam,
    pre: &[f64],
    post: &[f64],
) -> Result<ScalarStatResult, AnalysisError> {
    let (t_statistic, df) = paired_t_statistic(pre, post)?;

    let pre_mean = mean(pre);
    let post_mean = mean(post);

    Ok(ScalarStatResult {
        parameter,
        n: pre.len(),
        pre_mean,
        post_mean,
        pre_std: sample_std(pre),
        post_std: sample_std(post),
        percent_change: percent_change(pre_mean, post_mean).ok(),
        t_statistic,
        p_value: two_sided_p_value(t_statistic, df),
    })
}
