//! Pair matching and the three grouping configurations.
//!
//! All three configurations share one group-by-key pipeline; the only
//! difference between them is the key extracted from a matched pair.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{GroupKey, MatchedPair, Measurement, Phase};

/// The grouping axis of one test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingKind {
    /// One group per measurement set, pooling all subjects.
    BySetAcrossSubjects,
    /// One group per subject, pooling all of that subject's sets.
    BySubjectAcrossSets,
    /// One group per subject and set.
    BySubjectBySet,
}

impl GroupingKind {
    /// All configurations in canonical evaluation order.
    pub const ALL: [GroupingKind; 3] = [
        GroupingKind::BySetAcrossSubjects,
        GroupingKind::BySubjectAcrossSets,
        GroupingKind::BySubjectBySet,
    ];

    /// The grouping key a pair belongs to under this configuration.
    pub fn key(&self, pair: &MatchedPair) -> GroupKey {
        match self {
            GroupingKind::BySetAcrossSubjects => GroupKey::Set(pair.set_index()),
            GroupingKind::BySubjectAcrossSets => GroupKey::Subject(pair.subject_id()),
            GroupingKind::BySubjectBySet => GroupKey::SubjectSet {
                subject: pair.subject_id(),
                set: pair.set_index(),
            },
        }
    }

    /// Human-readable configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingKind::BySetAcrossSubjects => "by-set-across-subjects",
            GroupingKind::BySubjectAcrossSets => "by-subject-across-sets",
            GroupingKind::BySubjectBySet => "by-subject-by-set",
        }
    }
}

impl std::fmt::Display for GroupingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match pre/post measurements into pairs by (subject, set).
///
/// Measurements without a counterpart are reported in the returned
/// warning list, not silently dropped. Duplicate (subject, set, phase)
/// records keep the last occurrence and are also reported.
pub fn match_pairs(measurements: &[Measurement]) -> (Vec<MatchedPair>, Vec<String>) {
    let mut pre: BTreeMap<(u32, u32), &Measurement> = BTreeMap::new();
    let mut post: BTreeMap<(u32, u32), &Measurement> = BTreeMap::new();
    let mut warnings = Vec::new();

    for m in measurements {
        let slot = match m.phase {
            Phase::Pre => &mut pre,
            Phase::Post => &mut post,
        };
        if slot.insert((m.subject_id, m.set_index), m).is_some() {
            warnings.push(format!(
                "duplicate {:?} measurement for subject {} set {}; keeping the last",
                m.phase, m.subject_id, m.set_index
            ));
        }
    }

    let mut pairs = Vec::new();
    for (&key, &pre_m) in &pre {
        match post.remove(&key) {
            Some(post_m) => {
                // Identity was already checked by the map key.
                pairs.push(MatchedPair {
                    pre: pre_m.clone(),
                    post: post_m.clone(),
                });
            }
            None => warnings.push(format!(
                "no post-exercise counterpart for subject {} set {}",
                key.0, key.1
            )),
        }
    }
    for &key in post.keys() {
        warnings.push(format!(
            "no pre-exercise counterpart for subject {} set {}",
            key.0, key.1
        ));
    }

    (pairs, warnings)
}

/// Group matched pairs by the configuration's key.
///
/// `BTreeMap` keeps groups in the deterministic presentation order
/// (subjects ascending, sets ascending) without a separate sort pass.
pub fn group_pairs<'a>(
    pairs: &'a [MatchedPair],
    kind: GroupingKind,
) -> BTreeMap<GroupKey, Vec<&'a MatchedPair>> {
    let mut groups: BTreeMap<GroupKey, Vec<&MatchedPair>> = BTreeMap::new();
    for pair in pairs {
        groups.entry(kind.key(pair)).or_default().push(pair);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(subject: u32, set: u32, phase: Phase) -> Measurement {
        Measurement::new(subject, set, phase, vec![0.0, 1.0, 0.5])
    }

    fn cohort() -> Vec<Measurement> {
        let mut out = Vec::new();
        for subject in 1..=3 {
            for set in 1..=2 {
                out.push(measurement(subject, set, Phase::Pre));
                out.push(measurement(subject, set, Phase::Post));
            }
        }
        out
    }

    #[test]
    fn test_match_pairs_complete_cohort() {
        let (pairs, warnings) = match_pairs(&cohort());
        assert_eq!(pairs.len(), 6);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_match_pairs_reports_unmatched() {
        let mut measurements = cohort();
        measurements.push(measurement(9, 1, Phase::Pre));
        let (pairs, warnings) = match_pairs(&measurements);
        assert_eq!(pairs.len(), 6);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("subject 9"));
    }

    #[test]
    fn test_group_by_set_pools_subjects() {
        let (pairs, _) = match_pairs(&cohort());
        let groups = group_pairs(&pairs, GroupingKind::BySetAcrossSubjects);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&GroupKey::Set(1)].len(), 3);
        assert_eq!(groups[&GroupKey::Set(2)].len(), 3);
    }

    #[test]
    fn test_group_by_subject_pools_sets() {
        let (pairs, _) = match_pairs(&cohort());
        let groups = group_pairs(&pairs, GroupingKind::BySubjectAcrossSets);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&GroupKey::Subject(2)].len(), 2);
    }

    #[test]
    fn test_group_by_subject_by_set_is_singleton() {
        let (pairs, _) = match_pairs(&cohort());
        let groups = group_pairs(&pairs, GroupingKind::BySubjectBySet);
        assert_eq!(groups.len(), 6);
        assert!(groups.values().all(|g| g.len() == 1));
    }
}
