//! Error taxonomy for the analysis pipeline.
//!
//! Per-unit and per-group failures are recoverable by design: the
//! orchestrator catches them, records the omission, and completes the run
//! with partial results. Nothing here is globally fatal.

/// Errors produced by the preprocessing, extraction, and statistics engines.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Malformed or mismatched input signal. The offending unit is
    /// excluded from its group.
    InvalidSignal(String),

    /// Arrays of differing length passed to the SPM engine. Fatal for
    /// that group only.
    MisalignedSignal {
        /// Length of the first signal in the collection.
        expected: usize,
        /// Length of the offending signal.
        actual: usize,
    },

    /// Fewer paired units than the statistics require. The group is
    /// skipped, not the run.
    InsufficientSample {
        /// Minimum number of paired units.
        required: usize,
        /// Number of paired units supplied.
        actual: usize,
    },

    /// Zero pre-exercise baseline; percent change is undefined.
    DegenerateBaseline,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InvalidSignal(reason) => {
                write!(f, "invalid signal: {}", reason)
            }
            AnalysisError::MisalignedSignal { expected, actual } => {
                write!(
                    f,
                    "misaligned signals: expected length {}, got {}",
                    expected, actual
                )
            }
            AnalysisError::InsufficientSample { required, actual } => {
                write!(
                    f,
                    "insufficient sample: {} paired units supplied, {} required",
                    actual, required
                )
            }
            AnalysisError::DegenerateBaseline => {
                write!(f, "degenerate baseline: pre-exercise mean is zero")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::MisalignedSignal {
            expected: 100,
            actual: 99,
        };
        assert!(err.to_string().contains("expected length 100"));

        let err = AnalysisError::InsufficientSample {
            required: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("1 paired units"));
    }
}
