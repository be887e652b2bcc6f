//! Acquisition-filter artifact correction.

/// Remove the early-sample filter offset from a group of post signals.
///
/// The acquisition filter leaves non-physical transients of order
/// 0.001 mm in the first few samples of a trace. Against typical
/// displacements of several millimeters they are invisible, but the SPM
/// t-statistic divides by the (near-zero) variance there and reports
/// spurious significance at the continuum start.
///
/// The correction averages the group-mean pre and post signals over the
/// first `leading` samples and, when the post mean is the larger,
/// subtracts the offset from every post signal. Shifting a trace by a
/// constant of this magnitude leaves the later (> ~5 ms) portion of the
/// curve unaffected.
///
/// # Arguments
///
/// * `pre` - Pre-exercise signals of one group, aligned
/// * `post` - Post-exercise signals of the same group
/// * `leading` - Number of initial samples to average (typically 3)
///
/// # Returns
///
/// The adjusted post signals; pre signals are never modified.
pub fn correct_filter_artifact(
    pre: &[Vec<f64>],
    post: &[Vec<f64>],
    leading: usize,
) -> Vec<Vec<f64>> {
    let pre_mean = leading_mean(pre, leading);
    let post_mean = leading_mean(post, leading);

    let offset = match (pre_mean, post_mean) {
        (Some(pre_mean), Some(post_mean)) if post_mean > pre_mean => post_mean - pre_mean,
        _ => return post.to_vec(),
    };

    post.iter()
        .map(|signal| signal.iter().map(|&v| v - offset).collect())
        .collect()
}

/// Mean of the first `leading` samples of the group-mean signal.
fn leading_mean(group: &[Vec<f64>], leading: usize) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for signal in group {
        for &v in signal.iter().take(leading) {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}
