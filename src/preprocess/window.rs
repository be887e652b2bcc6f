//! Trimming and pairwise normalization.

use crate::error::AnalysisError;
use crate::types::Measurement;

/// Restrict a measurement to its SPM comparison window.
///
/// Returns a measurement holding samples
/// `[skip_leading, skip_leading + window)`. The leading samples are
/// excluded because the 0th sample of every TMG trace is identically
/// zero, which gives the paired t-statistic a zero-variance singularity
/// at the continuum start. Cluster times are reported with the matching
/// offset by the SPM engine.
///
/// # Errors
///
/// `InvalidSignal` when the trace is shorter than the requested window.
pub fn trim_for_spm(
    measurement: &Measurement,
    window: usize,
    skip_leading: usize,
) -> Result<Measurement, AnalysisError> {
    let end = skip_leading + window;
    if measurement.samples.len() < end {
        return Err(AnalysisError::InvalidSignal(format!(
            "trace of {} samples shorter than window end {}",
            measurement.samples.len(),
            end
        )));
    }
    Ok(Measurement {
        samples: measurement.samples[skip_leading..end].to_vec(),
        ..*measurement
    })
}

/// Normalize a pre/post pair by its joint maximum.
///
/// Both traces are divided by the maximum absolute displacement observed
/// across the *pair*, not by each trace's own maximum: the relative
/// amplitude difference between pre and post is the potentiation signal
/// and must survive normalization. The result is bounded to \[0, 1\]
/// and the operation is idempotent.
///
/// # Errors
///
/// `InvalidSignal` when the traces differ in length or the joint maximum
/// is zero.
pub fn normalize_pair(
    pre: &Measurement,
    post: &Measurement,
) -> Result<(Measurement, Measurement), AnalysisError> {
    if pre.samples.len() != post.samples.len() {
        return Err(AnalysisError::InvalidSignal(format!(
            "pair length mismatch: pre has {} samples, post has {}",
            pre.samples.len(),
            post.samples.len()
        )));
    }

    let joint_max = pre
        .samples
        .iter()
        .chain(post.samples.iter())
        .fold(0.0_f64, |acc, &v| acc.max(v.abs()));

    if joint_max == 0.0 {
        return Err(AnalysisError::InvalidSignal(
            "pair maximum is zero; cannot normalize".into(),
        ));
    }

    let scale = |m: &Measurement| Measurement {
        samples: m.samples.iter().map(|&v| v / joint_max).collect(),
        ..*m
    };

    Ok((scale(pre), scale(post)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn measurement(samples: Vec<f64>, phase: Phase) -> Measurement {
        Measurement::new(1, 1, phase, samples)
    }

    #[test]
    fn test_trim_window() {
        let m = measurement((0..10).map(|i| i as f64).collect(), Phase::Pre);
        let trimmed = trim_for_spm(&m, 4, 1).unwrap();
        assert_eq!(trimmed.samples, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(trimmed.subject_id, 1);
    }

    #[test]
    fn test_trim_too_short() {
        let m = measurement(vec![0.0; 10], Phase::Pre);
        assert!(trim_for_spm(&m, 10, 1).is_err());
        assert!(trim_for_spm(&m, 10, 0).is_ok());
    }

    #[test]
    fn test_normalize_preserves_relative_amplitude() {
        let pre = measurement(vec![0.0, 2.0, 4.0], Phase::Pre);
        let post = measurement(vec![0.0, 4.0, 8.0], Phase::Post);
        let (pre_n, post_n) = normalize_pair(&pre, &post).unwrap();

        // Joint maximum is 8.0; the pre trace tops out at 0.5.
        assert!((pre_n.samples[2] - 0.5).abs() < 1e-12);
        assert!((post_n.samples[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let pre = measurement(vec![0.0, 0.25, 0.5], Phase::Pre);
        let post = measurement(vec![0.0, 0.5, 1.0], Phase::Post);
        let (pre_n, post_n) = normalize_pair(&pre, &post).unwrap();
        assert_eq!(pre_n.samples, pre.samples);
        assert_eq!(post_n.samples, post.samples);

        let joint_max = post_n
            .samples
            .iter()
            .fold(0.0_f64, |acc, &v| acc.max(v.abs()));
        assert!((joint_max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_rejects_zero_pair() {
        let pre = measurement(vec![0.0, 0.0], Phase::Pre);
        let post = measurement(vec![0.0, 0.0], Phase::Post);
        assert!(normalize_pair(&pre, &post).is_err());
    }

    #[test]
    fn test_normalize_rejects_length_mismatch() {
        let pre = measurement(vec![0.0, 1.0], Phase::Pre);
        let post = measurement(vec![0.0, 1.0, 2.0], Phase::Post);
        assert!(normalize_pair(&pre, &post).is_err());
    }
}
