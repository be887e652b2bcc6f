//! The assembled SPM paired t-test.

use crate::config::TailMode;
use crate::constants::SAMPLE_INTERVAL_MS;
use crate::error::AnalysisError;
use crate::result::SpmResult;

use super::cluster::{build_cluster, supra_threshold_runs};
use super::continuum::paired_t_continuum;
use super::rft::{RandomFieldCalibrator, ThresholdCalibrator};

/// Knobs for one SPM test.
#[derive(Debug, Clone, Copy)]
pub struct SpmSettings {
    /// Significance level for the field maximum (default 0.05).
    pub alpha: f64,
    /// One- or two-tailed inference (default one-tailed; the
    /// potentiation hypothesis is directional).
    pub tail: TailMode,
    /// Offset added to reported cluster times, matching any leading
    /// samples trimmed from the comparison window (default 0).
    pub time_offset_ms: f64,
}

impl Default for SpmSettings {
    fn default() -> Self {
        Self {
            alpha: crate::constants::DEFAULT_ALPHA,
            tail: TailMode::OneTailed,
            time_offset_ms: 0.0,
        }
    }
}

/// SPM paired t-test with the standard random-field calibration.
///
/// See [`spm_test_with`] for the pipeline.
pub fn spm_test(
    pre: &[Vec<f64>],
    post: &[Vec<f64>],
    settings: &SpmSettings,
) -> Result<SpmResult, AnalysisError> {
    spm_test_with(pre, post, settings, &RandomFieldCalibrator)
}

/// SPM paired t-test with a caller-supplied threshold calibration.
///
/// Pipeline:
/// 1. pointwise paired t continuum and residual FWHM;
/// 2. critical threshold t* at `alpha` (or `alpha/2` per tail for
///    two-tailed inference) for a field of `(L−1)/FWHM` resels;
/// 3. supra-threshold clusters with cluster-extent probabilities
///    (doubled for two-tailed inference).
///
/// All clusters are retained: multiple significance windows are
/// meaningful in this domain.
///
/// # Errors
///
/// * `InsufficientSample` — fewer than two pairs
/// * `InvalidSignal` — pre/post counts differ or signals are empty
/// * `MisalignedSignal` — signals of differing length
pub fn spm_test_with(
    pre: &[Vec<f64>],
    post: &[Vec<f64>],
    settings: &SpmSettings,
    calibrator: &dyn ThresholdCalibrator,
) -> Result<SpmResult, AnalysisError> {
    let continuum = paired_t_continuum(pre, post)?;
    let length = continuum.t.len();

    let resels = ((length - 1).max(1)) as f64 / continuum.fwhm;
    let tail_alpha = match settings.tail {
        TailMode::OneTailed => settings.alpha,
        TailMode::TwoTailed => settings.alpha / 2.0,
    };
    let threshold = calibrator.critical_threshold(continuum.df, resels, tail_alpha);

    let clusters = supra_threshold_runs(&continuum.t, threshold, settings.tail)
        .into_iter()
        .map(|(start, end)| {
            let extent_ms = (end - start) as f64 * SAMPLE_INTERVAL_MS;
            let extent_resels = extent_ms / continuum.fwhm;
            let mut p =
                calibrator.cluster_probability(continuum.df, resels, threshold, extent_resels);
            if settings.tail == TailMode::TwoTailed {
                p = (2.0 * p).clamp(0.0, 1.0);
            }
            build_cluster(
                &continuum.t,
                start,
                end,
                threshold,
                settings.time_offset_ms,
                p,
            )
        })
        .collect();

    Ok(SpmResult {
        t_continuum: continuum.t,
        df: continuum.df,
        fwhm: continuum.fwhm,
        threshold,
        alpha: settings.alpha,
        tail: settings.tail,
        n_pairs: continuum.n_pairs,
        clusters,
    })
}
