//! Result types handed to reporting collaborators.

use serde::{Deserialize, Serialize};

use crate::config::TailMode;
use crate::extraction::TmgParam;
use crate::grouping::GroupingKind;
use crate::types::GroupKey;

/// One row of the per-parameter comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarStatResult {
    /// Parameter under comparison.
    pub parameter: TmgParam,

    /// Number of matched pairs entering the comparison.
    pub n: usize,

    /// Pre-exercise mean.
    pub pre_mean: f64,

    /// Post-exercise mean.
    pub post_mean: f64,

    /// Pre-exercise sample standard deviation (Bessel-corrected).
    pub pre_std: f64,

    /// Post-exercise sample standard deviation (Bessel-corrected).
    pub post_std: f64,

    /// Percent change of the post mean relative to the pre mean;
    /// `None` when the baseline is zero (rendered "n/a" downstream).
    pub percent_change: Option<f64>,

    /// Paired t-statistic; NaN when the differences have zero variance.
    pub t_statistic: f64,

    /// Two-sided p-value; NaN when the statistic is undefined.
    pub p_value: f64,
}

/// A supra-threshold cluster of the SPM t continuum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// First continuum index in the cluster (inclusive).
    pub start_index: usize,

    /// Last continuum index in the cluster (inclusive).
    pub end_index: usize,

    /// Cluster onset in milliseconds, offset-corrected for trimmed
    /// leading samples.
    pub start_time_ms: f64,

    /// Cluster end in milliseconds.
    pub end_time_ms: f64,

    /// Extreme t value inside the cluster (signed).
    pub peak_t: f64,

    /// Center of mass of the cluster along the time axis \[ms\].
    pub centroid_time_ms: f64,

    /// Mean |t| over the cluster.
    pub centroid_t: f64,

    /// Trapezoidal area between |t| and the critical threshold.
    pub area_above_threshold: f64,

    /// Trapezoidal area between |t| and the time axis.
    pub area_above_axis: f64,

    /// Cluster-level probability under the random-field null.
    pub p_value: f64,
}

impl Cluster {
    /// Cluster extent in continuum nodes (inclusive bounds).
    pub fn extent_nodes(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Result of one SPM paired t-test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpmResult {
    /// The paired t-statistic continuum over the comparison window.
    pub t_continuum: Vec<f64>,

    /// Degrees of freedom (n − 1).
    pub df: f64,

    /// Estimated continuum smoothness as full width at half maximum,
    /// in continuum nodes.
    pub fwhm: f64,

    /// Random-field critical threshold t*.
    pub threshold: f64,

    /// Significance level the threshold was calibrated for.
    pub alpha: f64,

    /// Tail mode used for inference.
    pub tail: TailMode,

    /// Number of matched pairs entering the test.
    pub n_pairs: usize,

    /// All supra-threshold clusters, in temporal order.
    pub clusters: Vec<Cluster>,
}

impl SpmResult {
    /// True when at least one supra-threshold cluster exists.
    pub fn significant(&self) -> bool {
        !self.clusters.is_empty()
    }
}

/// Results for one group within a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResult {
    /// Grouping key (set, subject, or subject × set).
    pub key: GroupKey,

    /// Matched pairs in the group.
    pub n_pairs: usize,

    /// Per-parameter comparison rows, in canonical parameter order.
    pub scalar: Vec<ScalarStatResult>,

    /// Parameters omitted from the table, with reasons (e.g. too many
    /// missing crossings).
    pub omitted_parameters: Vec<String>,

    /// Extraction warnings recorded while processing the group's units.
    pub warnings: Vec<String>,

    /// SPM paired t-test over the group's displacement windows.
    pub spm: SpmResult,
}

/// A group excluded from a configuration's results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedGroup {
    /// Grouping key of the omitted group.
    pub key: GroupKey,

    /// Why the group was skipped.
    pub reason: String,
}

/// Results of one grouping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationResult {
    /// The grouping axis.
    pub kind: GroupingKind,

    /// Per-group results in deterministic order (subjects ascending,
    /// sets ascending).
    pub groups: Vec<GroupResult>,

    /// Groups omitted from the run, with reasons.
    pub skipped: Vec<SkippedGroup>,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyResult {
    /// One entry per requested grouping configuration, in request order.
    pub configurations: Vec<ConfigurationResult>,

    /// Pair-matching warnings (unmatched or duplicate measurements).
    pub warnings: Vec<String>,
}

impl StudyResult {
    /// Results for one grouping configuration, if it was requested.
    pub fn configuration(&self, kind: GroupingKind) -> Option<&ConfigurationResult> {
        self.configurations.iter().find(|c| c.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_extent() {
        let cluster = Cluster {
            start_index: 120,
            end_index: 180,
            start_time_ms: 121.0,
            end_time_ms: 181.0,
            peak_t: 4.2,
            centroid_time_ms: 150.0,
            centroid_t: 3.5,
            area_above_threshold: 10.0,
            area_above_axis: 60.0,
            p_value: 0.01,
        };
        assert_eq!(cluster.extent_nodes(), 61);
    }

    #[test]
    fn test_significance_flag() {
        let mut result = SpmResult {
            t_continuum: vec![0.0; 10],
            df: 9.0,
            fwhm: 5.0,
            threshold: 3.0,
            alpha: 0.05,
            tail: TailMode::OneTailed,
            n_pairs: 10,
            clusters: Vec::new(),
        };
        assert!(!result.significant());

        result.clusters.push(Cluster {
            start_index: 0,
            end_index: 1,
            start_time_ms: 1.0,
            end_time_ms: 2.0,
            peak_t: 3.5,
            centroid_time_ms: 1.5,
            centroid_t: 3.2,
            area_above_threshold: 0.4,
            area_above_axis: 6.5,
            p_value: 0.03,
        });
        assert!(result.significant());
    }
}
