//! Statistical parametric mapping over displacement continua.
//!
//! The engine runs in four stages:
//!
//! 1. **Continuum** ([`continuum`]): pointwise paired t-statistic and
//!    residual smoothness (FWHM) estimation
//! 2. **Calibration** ([`rft`]): random-field critical threshold t* for
//!    the requested alpha and tail mode
//! 3. **Cluster detection** ([`cluster`]): maximal supra-threshold runs
//!    and their geometry
//! 4. **Inference** ([`inference`]): the assembled [`SpmResult`](crate::result::SpmResult)
//!    with cluster-level probabilities

mod cluster;
mod continuum;
mod inference;
mod rft;

pub use cluster::{build_cluster, supra_threshold_runs};
pub use continuum::{estimate_fwhm, paired_t_continuum, Continuum};
pub use inference::{spm_test, spm_test_with, SpmSettings};
pub use rft::{RandomFieldCalibrator, ThresholdCalibrator};
