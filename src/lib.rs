//! # tmg-potentiation
//!
//! Detect twitch potentiation in tensiomyography (TMG) measurements.
//!
//! This crate provides the statistical methodology for comparing pre- and
//! post-exercise muscle-displacement time series, using two complementary
//! techniques:
//! - Scalar contraction parameters (Dm, Td, Tc, Ts, Tr and their
//!   rate-of-displacement counterparts) with paired t-tests
//! - Statistical parametric mapping (SPM): a paired t-test over the whole
//!   displacement continuum with random-field threshold and cluster
//!   inference
//!
//! Both techniques run across three grouping configurations: across
//! subjects per measurement set, within subject across sets, and within
//! subject within set.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tmg_potentiation::{analyze, Measurement, Phase};
//!
//! // One Measurement per (subject, set, phase) from your data pipeline.
//! let study = analyze(&measurements);
//!
//! for config in &study.configurations {
//!     for group in &config.groups {
//!         println!("{}: SPM significant = {}", group.key, group.spm.significant());
//!     }
//! }
//! ```
//!
//! Raw-data conversion, exclusion lists, plotting, and table generation
//! are collaborators' concerns; the crate consumes phase-tagged
//! displacement arrays and exposes result objects (plus terminal/JSON
//! rendering in [`output`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analyzer;
mod config;
mod constants;
mod error;
mod result;
mod types;

// Functional modules
pub mod extraction;
pub mod grouping;
pub mod output;
pub mod preprocess;
pub mod spm;
pub mod statistics;

// Re-exports for public API
pub use analyzer::PotentiationAnalyzer;
pub use config::{Config, TailMode, ThresholdFractions};
pub use constants::{DEFAULT_ALPHA, DEFAULT_SPM_WINDOW_MS, SAMPLE_INTERVAL_MS, SIGNAL_LENGTH};
pub use error::AnalysisError;
pub use extraction::{Extraction, ExtractionWarning, ParameterVector, TmgParam};
pub use grouping::GroupingKind;
pub use result::{
    Cluster, ConfigurationResult, GroupResult, ScalarStatResult, SkippedGroup, SpmResult,
    StudyResult,
};
pub use types::{GroupKey, MatchedPair, Measurement, Phase};

/// Convenience function: run the full analysis with default
/// configuration.
///
/// Equivalent to `PotentiationAnalyzer::new().run(measurements)` —
/// 100 ms SPM window, one-tailed inference at alpha 0.05, all three
/// grouping configurations.
pub fn analyze(measurements: &[Measurement]) -> StudyResult {
    PotentiationAnalyzer::new().run(measurements)
}
