//! Main `PotentiationAnalyzer` entry point and orchestration.

use rayon::prelude::*;

use crate::config::{Config, TailMode, ThresholdFractions};
use crate::constants::SAMPLE_INTERVAL_MS;
use crate::extraction::{extract_with, ParameterVector, TmgParam};
use crate::grouping::{group_pairs, match_pairs, GroupingKind};
use crate::preprocess::{correct_filter_artifact, normalize_pair, trim_for_spm};
use crate::result::{ConfigurationResult, GroupResult, SkippedGroup, StudyResult};
use crate::spm::{spm_test, SpmSettings};
use crate::statistics::paired_compare;
use crate::types::{GroupKey, MatchedPair, Measurement};

/// Main entry point for potentiation analysis.
///
/// Use the builder pattern to configure and run a study:
///
/// ```ignore
/// use tmg_potentiation::{PotentiationAnalyzer, TailMode};
///
/// let study = PotentiationAnalyzer::new()
///     .alpha(0.05)
///     .tail(TailMode::OneTailed)
///     .normalize_pairs(true)
///     .run(&measurements);
///
/// for config in &study.configurations {
///     println!("{}: {} groups", config.kind, config.groups.len());
/// }
/// ```
///
/// The run always completes: per-unit and per-group failures are caught,
/// recorded, and excluded, never escalated to the whole study.
#[derive(Debug, Clone, Default)]
pub struct PotentiationAnalyzer {
    config: Config,
}

/// One pair that survived extraction and preprocessing.
struct PreparedPair {
    pre_params: ParameterVector,
    post_params: ParameterVector,
    pre_window: Vec<f64>,
    post_window: Vec<f64>,
    warnings: Vec<String>,
}

impl PotentiationAnalyzer {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the SPM significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set one- or two-tailed SPM inference.
    pub fn tail(mut self, tail: TailMode) -> Self {
        self.config.tail = tail;
        self
    }

    /// Set the SPM comparison window in milliseconds.
    pub fn spm_window_ms(mut self, window: usize) -> Self {
        self.config.spm_window_ms = window;
        self
    }

    /// Enable or disable pairwise normalization before SPM comparison.
    pub fn normalize_pairs(mut self, normalize: bool) -> Self {
        self.config.normalize_pairs = normalize;
        self
    }

    /// Set the minimum paired units per group.
    pub fn min_group_size(mut self, n: usize) -> Self {
        self.config.min_group_size = n;
        self
    }

    /// Set the amplitude threshold fractions for parameter extraction.
    pub fn thresholds(mut self, thresholds: ThresholdFractions) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Restrict the run to specific grouping configurations.
    pub fn groupings(mut self, groupings: &[GroupingKind]) -> Self {
        self.config.groupings = groupings.to_vec();
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full analysis over a collection of measurements.
    ///
    /// Measurements are matched into pre/post pairs by (subject, set),
    /// grouped per requested configuration, and fed to both statistics
    /// engines. Groups are evaluated in parallel; results are assembled
    /// in deterministic order (subjects ascending, sets ascending,
    /// parameters in canonical order).
    ///
    /// # Panics
    ///
    /// Panics on programming-contract violations in the configuration
    /// (zero window, alpha outside (0, 1), unordered threshold
    /// fractions).
    pub fn run(&self, measurements: &[Measurement]) -> StudyResult {
        self.config.validate();

        let (pairs, warnings) = match_pairs(measurements);

        let configurations = self
            .config
            .groupings
            .iter()
            .map(|&kind| self.run_configuration(kind, &pairs))
            .collect();

        StudyResult {
            configurations,
            warnings,
        }
    }

    /// Evaluate one grouping configuration.
    fn run_configuration(&self, kind: GroupingKind, pairs: &[MatchedPair]) -> ConfigurationResult {
        // BTreeMap iteration gives groups in presentation order; the
        // parallel map preserves it.
        let grouped: Vec<(GroupKey, Vec<&MatchedPair>)> =
            group_pairs(pairs, kind).into_iter().collect();

        let outcomes: Vec<Result<GroupResult, SkippedGroup>> = grouped
            .par_iter()
            .map(|(key, group)| self.evaluate_group(*key, group))
            .collect();

        let mut groups = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(group) => groups.push(group),
                Err(skip) => {
                    eprintln!("[SKIPPED] {} ({}): {}", skip.key, kind, skip.reason);
                    skipped.push(skip);
                }
            }
        }

        ConfigurationResult {
            kind,
            groups,
            skipped,
        }
    }

    /// Evaluate one group: prepare its pairs, then run both engines.
    fn evaluate_group(
        &self,
        key: GroupKey,
        group: &[&MatchedPair],
    ) -> Result<GroupResult, SkippedGroup> {
        if group.len() < self.config.min_group_size {
            return Err(SkippedGroup {
                key,
                reason: format!(
                    "skipped: insufficient sample ({} pairs, {} required)",
                    group.len(),
                    self.config.min_group_size
                ),
            });
        }

        let mut prepared = Vec::with_capacity(group.len());
        let mut warnings = Vec::new();
        for pair in group {
            match self.prepare_pair(pair) {
                Ok(unit) => prepared.push(unit),
                Err(reason) => warnings.push(format!(
                    "subject {} set {} excluded: {}",
                    pair.subject_id(),
                    pair.set_index(),
                    reason
                )),
            }
        }

        if prepared.len() < self.config.min_group_size {
            return Err(SkippedGroup {
                key,
                reason: format!(
                    "skipped: insufficient sample ({} of {} pairs usable, {} required)",
                    prepared.len(),
                    group.len(),
                    self.config.min_group_size
                ),
            });
        }

        for unit in &prepared {
            warnings.extend(unit.warnings.iter().cloned());
        }

        // Scalar engine, one comparison per parameter in canonical order.
        let mut scalar = Vec::new();
        let mut omitted_parameters = Vec::new();
        for param in TmgParam::ALL {
            let mut pre_values = Vec::new();
            let mut post_values = Vec::new();
            for unit in &prepared {
                if let (Some(pre), Some(post)) =
                    (unit.pre_params.get(param), unit.post_params.get(param))
                {
                    pre_values.push(pre);
                    post_values.push(post);
                }
            }

            if pre_values.len() < self.config.min_group_size {
                omitted_parameters.push(format!(
                    "{}: {} of {} pairs usable ({} required)",
                    param,
                    pre_values.len(),
                    prepared.len(),
                    self.config.min_group_size
                ));
                continue;
            }

            match paired_compare(param, &pre_values, &post_values) {
                Ok(row) => scalar.push(row),
                Err(err) => omitted_parameters.push(format!("{}: {}", param, err)),
            }
        }

        // SPM engine over the preprocessed windows.
        let pre_windows: Vec<Vec<f64>> = prepared.iter().map(|u| u.pre_window.clone()).collect();
        let post_windows: Vec<Vec<f64>> = prepared.iter().map(|u| u.post_window.clone()).collect();
        let post_windows =
            correct_filter_artifact(&pre_windows, &post_windows, self.config.artifact_samples);

        let settings = SpmSettings {
            alpha: self.config.alpha,
            tail: self.config.tail,
            time_offset_ms: self.config.skip_leading_samples as f64 * SAMPLE_INTERVAL_MS,
        };
        let spm = spm_test(&pre_windows, &post_windows, &settings).map_err(|err| SkippedGroup {
            key,
            reason: format!("skipped: {}", err),
        })?;

        Ok(GroupResult {
            key,
            n_pairs: prepared.len(),
            scalar,
            omitted_parameters,
            warnings,
            spm,
        })
    }

    /// Extract parameters and build SPM windows for one pair.
    ///
    /// Any failure excludes the unit from its group; the reason is
    /// recorded by the caller.
    fn prepare_pair(&self, pair: &MatchedPair) -> Result<PreparedPair, String> {
        let pre_extraction = extract_with(&pair.pre.samples, &self.config.thresholds)
            .map_err(|e| e.to_string())?;
        let post_extraction = extract_with(&pair.post.samples, &self.config.thresholds)
            .map_err(|e| e.to_string())?;

        let mut pre_trimmed = trim_for_spm(
            &pair.pre,
            self.config.spm_window_ms,
            self.config.skip_leading_samples,
        )
        .map_err(|e| e.to_string())?;
        let mut post_trimmed = trim_for_spm(
            &pair.post,
            self.config.spm_window_ms,
            self.config.skip_leading_samples,
        )
        .map_err(|e| e.to_string())?;

        if self.config.normalize_pairs {
            let (pre_n, post_n) =
                normalize_pair(&pre_trimmed, &post_trimmed).map_err(|e| e.to_string())?;
            pre_trimmed = pre_n;
            post_trimmed = post_n;
        }

        let describe = |w: &crate::extraction::ExtractionWarning, phase: &str| {
            format!(
                "subject {} set {} ({}): {} missing ({})",
                pair.subject_id(),
                pair.set_index(),
                phase,
                w.parameter,
                w.message
            )
        };
        let mut warnings: Vec<String> = pre_extraction
            .warnings
            .iter()
            .map(|w| describe(w, "pre"))
            .collect();
        warnings.extend(post_extraction.warnings.iter().map(|w| describe(w, "post")));

        Ok(PreparedPair {
            pre_params: pre_extraction.params,
            post_params: post_extraction.params,
            pre_window: pre_trimmed.samples,
            post_window: post_trimmed.samples,
            warnings,
        })
    }
}
