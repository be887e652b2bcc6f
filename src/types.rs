//! Measurement records, matched pairs, and grouping keys.

use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_INTERVAL_MS;

/// Measurement phase relative to the conditioning exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Captured before the conditioning exercise.
    Pre,
    /// Captured after the conditioning exercise.
    Post,
}

/// One TMG measurement: a displacement trace tagged with its origin.
///
/// Samples are displacement in millimeters at 1 ms spacing. Instances are
/// produced by the preprocessing collaborator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Subject identifier.
    pub subject_id: u32,
    /// Measurement-set index within the session (1-based).
    pub set_index: u32,
    /// Pre- or post-exercise.
    pub phase: Phase,
    /// Displacement samples in millimeters.
    pub samples: Vec<f64>,
}

impl Measurement {
    /// Create a measurement from a displacement trace.
    pub fn new(subject_id: u32, set_index: u32, phase: Phase, samples: Vec<f64>) -> Self {
        Self {
            subject_id,
            set_index,
            phase,
            samples,
        }
    }

    /// Number of samples in the trace.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the trace in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.samples.len() as f64 * SAMPLE_INTERVAL_MS
    }
}

/// A pre/post measurement pair sharing subject and set identity.
///
/// The unit of comparison for both statistics engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Pre-exercise measurement.
    pub pre: Measurement,
    /// Post-exercise measurement.
    pub post: Measurement,
}

impl MatchedPair {
    /// Pair two measurements, checking they share subject and set and
    /// carry the expected phases.
    pub fn new(pre: Measurement, post: Measurement) -> Option<Self> {
        let matched = pre.subject_id == post.subject_id
            && pre.set_index == post.set_index
            && pre.phase == Phase::Pre
            && post.phase == Phase::Post;
        matched.then_some(Self { pre, post })
    }

    /// Subject shared by both measurements.
    pub fn subject_id(&self) -> u32 {
        self.pre.subject_id
    }

    /// Set index shared by both measurements.
    pub fn set_index(&self) -> u32 {
        self.pre.set_index
    }
}

/// Key identifying one group of matched pairs within a configuration.
///
/// The `Ord` impl gives the deterministic result ordering: subjects
/// ascending by ID, sets ascending by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    /// All subjects, one measurement set.
    Set(u32),
    /// One subject, all measurement sets.
    Subject(u32),
    /// One subject, one measurement set.
    SubjectSet {
        /// Subject identifier.
        subject: u32,
        /// Set index.
        set: u32,
    },
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Set(set) => write!(f, "set {}", set),
            GroupKey::Subject(subject) => write!(f, "subject {}", subject),
            GroupKey::SubjectSet { subject, set } => {
                write!(f, "subject {} / set {}", subject, set)
            }
        }
    }
}
