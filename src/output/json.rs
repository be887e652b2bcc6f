//! JSON serialization for study results.

use crate::result::StudyResult;

/// Serialize a StudyResult to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// StudyResult).
pub fn to_json(study: &StudyResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(study)
}

/// Serialize a StudyResult to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// StudyResult).
pub fn to_json_pretty(study: &StudyResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(study)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;
    use crate::types::{Measurement, Phase};

    fn small_study() -> StudyResult {
        let mut measurements = Vec::new();
        for subject in 1..=3u32 {
            // Pre and post differ in amplitude and in time course, so no
            // parameter difference collapses to zero variance.
            let cases = [
                (Phase::Pre, 5.0, 30.0 + subject as f64),
                (Phase::Post, 6.0 + subject as f64 * 0.1, 30.0 + subject as f64 * 1.7),
            ];
            for (phase, peak, rise) in cases {
                let samples: Vec<f64> = (0..200)
                    .map(|i| {
                        let x = i as f64 / rise;
                        if x <= 2.0 {
                            peak * 0.5 * (1.0 - (std::f64::consts::PI * x).cos())
                        } else {
                            0.0
                        }
                    })
                    .collect();
                measurements.push(Measurement::new(subject, 1, phase, samples));
            }
        }
        analyze(&measurements)
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&small_study()).unwrap();
        assert!(json.contains("\"configurations\""));
        assert!(json.contains("\"t_continuum\""));
    }

    #[test]
    fn test_to_json_pretty_roundtrip() {
        let study = small_study();
        let json = to_json_pretty(&study).unwrap();
        assert!(json.contains('\n'));

        let parsed: StudyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.configurations.len(), study.configurations.len());
    }
}
