//! Configuration for potentiation analysis.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_ARTIFACT_SAMPLES, DEFAULT_SKIP_LEADING_SAMPLES, DEFAULT_SPM_WINDOW_MS,
    LOWER_THRESHOLD_FRACTION, MIN_PAIRED_SAMPLES, SUSTAIN_THRESHOLD_FRACTION,
    UPPER_THRESHOLD_FRACTION,
};
use crate::grouping::GroupingKind;

/// Tail mode for SPM inference.
///
/// The study's hypothesis is directional (post-exercise displacement
/// exceeds pre-exercise), so one-tailed inference is the default; the
/// two-tailed variant is kept as an explicit option because the choice is
/// a domain judgment, not a property of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TailMode {
    /// Test only for post > pre (positive t continuum).
    OneTailed,
    /// Test both directions at alpha/2 per tail.
    TwoTailed,
}

/// Amplitude threshold fractions used by the parameter extractor.
///
/// Fractions are relative to the maximum displacement Dm and must satisfy
/// `0 < lower < sustain < upper < 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFractions {
    /// Rising-edge fraction opening the contraction interval (default 0.1).
    pub lower: f64,
    /// Fraction bounding the sustain interval (default 0.5).
    pub sustain: f64,
    /// Rising-edge fraction closing the contraction interval (default 0.9).
    pub upper: f64,
}

impl Default for ThresholdFractions {
    fn default() -> Self {
        Self {
            lower: LOWER_THRESHOLD_FRACTION,
            sustain: SUSTAIN_THRESHOLD_FRACTION,
            upper: UPPER_THRESHOLD_FRACTION,
        }
    }
}

/// Configuration options for [`PotentiationAnalyzer`](crate::PotentiationAnalyzer).
#[derive(Debug, Clone)]
pub struct Config {
    /// SPM comparison window in milliseconds (default: 100).
    ///
    /// Scalar parameter extraction always uses the full trace; only the
    /// SPM continuum is restricted to this window.
    pub spm_window_ms: usize,

    /// Leading samples excluded from the SPM window (default: 1).
    ///
    /// The 0th sample of a TMG trace is identically zero across all
    /// measurements and would make the t-statistic singular there.
    pub skip_leading_samples: usize,

    /// Initial samples averaged by the filter-artifact correction
    /// (default: 3).
    pub artifact_samples: usize,

    /// Amplitude threshold fractions for parameter extraction
    /// (default: 0.1 / 0.5 / 0.9).
    pub thresholds: ThresholdFractions,

    /// Normalize each pre/post pair by its joint maximum before SPM
    /// comparison (default: false).
    pub normalize_pairs: bool,

    /// Significance level for SPM inference (default: 0.05).
    pub alpha: f64,

    /// One- or two-tailed SPM inference (default: one-tailed).
    pub tail: TailMode,

    /// Minimum paired units per group; thinner groups are skipped and
    /// recorded as omitted (default: 2).
    pub min_group_size: usize,

    /// Grouping configurations to evaluate, in evaluation order
    /// (default: all three).
    pub groupings: Vec<GroupingKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spm_window_ms: DEFAULT_SPM_WINDOW_MS,
            skip_leading_samples: DEFAULT_SKIP_LEADING_SAMPLES,
            artifact_samples: DEFAULT_ARTIFACT_SAMPLES,
            thresholds: ThresholdFractions::default(),
            normalize_pairs: false,
            alpha: DEFAULT_ALPHA,
            tail: TailMode::OneTailed,
            min_group_size: MIN_PAIRED_SAMPLES,
            groupings: GroupingKind::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Panic on programming-contract violations.
    ///
    /// Called once at the start of a run; invalid knob values are caller
    /// bugs, not data conditions.
    pub(crate) fn validate(&self) {
        assert!(self.spm_window_ms > 0, "SPM window must be positive");
        assert!(
            self.alpha > 0.0 && self.alpha < 1.0,
            "alpha must lie in (0, 1)"
        );
        assert!(
            self.min_group_size >= MIN_PAIRED_SAMPLES,
            "minimum group size must be at least {}",
            MIN_PAIRED_SAMPLES
        );
        let t = &self.thresholds;
        assert!(
            0.0 < t.lower && t.lower < t.sustain && t.sustain < t.upper && t.upper < 1.0,
            "threshold fractions must satisfy 0 < lower < sustain < upper < 1"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.spm_window_ms, 100);
        assert_eq!(config.skip_leading_samples, 1);
        assert_eq!(config.artifact_samples, 3);
        assert_eq!(config.tail, TailMode::OneTailed);
        assert_eq!(config.min_group_size, 2);
        assert_eq!(config.groupings.len(), 3);
        assert!((config.alpha - 0.05).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "alpha must lie in (0, 1)")]
    fn test_invalid_alpha_panics() {
        let config = Config {
            alpha: 1.5,
            ..Config::default()
        };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "threshold fractions")]
    fn test_unordered_fractions_panic() {
        let config = Config {
            thresholds: ThresholdFractions {
                lower: 0.5,
                sustain: 0.1,
                upper: 0.9,
            },
            ..Config::default()
        };
        config.validate();
    }
}
