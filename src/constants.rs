//! Crate-wide numeric constants.

/// Samples per raw TMG measurement (1 s of data at 1 kHz).
pub const SIGNAL_LENGTH: usize = 1000;

/// Sampling interval of a TMG trace in milliseconds.
pub const SAMPLE_INTERVAL_MS: f64 = 1.0;

/// SPM comparison window in milliseconds (the contraction transient;
/// the remaining ~900 ms of relaxation carries no potentiation signal).
pub const DEFAULT_SPM_WINDOW_MS: usize = 100;

/// Leading samples excluded from SPM analysis. The 0th sample of every
/// TMG trace is identically zero, which produces zero variance and a
/// singular t-statistic at the continuum start.
pub const DEFAULT_SKIP_LEADING_SAMPLES: usize = 1;

/// Initial samples averaged when correcting the acquisition-filter
/// artifact at the start of a trace.
pub const DEFAULT_ARTIFACT_SAMPLES: usize = 3;

/// Rising-edge amplitude fraction defining the delay time Td.
pub const LOWER_THRESHOLD_FRACTION: f64 = 0.1;

/// Amplitude fraction defining the sustain interval Ts and the
/// half-relaxation time Tr.
pub const SUSTAIN_THRESHOLD_FRACTION: f64 = 0.5;

/// Rising-edge amplitude fraction closing the contraction interval Tc.
pub const UPPER_THRESHOLD_FRACTION: f64 = 0.9;

/// Default significance level for SPM inference.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Minimum paired units required by either statistics engine.
pub const MIN_PAIRED_SAMPLES: usize = 2;

/// sqrt(4 ln 2); relates a Gaussian kernel's standard deviation to its
/// full width at half maximum.
pub const FWHM_SCALE: f64 = 1.665_109_222_315_395_6;
