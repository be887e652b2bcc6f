//! Supra-threshold cluster detection and geometry.

use crate::config::TailMode;
use crate::constants::SAMPLE_INTERVAL_MS;
use crate::result::Cluster;

/// Maximal contiguous index ranges where the continuum exceeds the
/// threshold, inclusive bounds, in temporal order.
///
/// One-tailed mode tests only the positive direction (post > pre);
/// two-tailed mode tests both directions by magnitude.
pub fn supra_threshold_runs(t: &[f64], threshold: f64, tail: TailMode) -> Vec<(usize, usize)> {
    let exceeds = |v: f64| match tail {
        TailMode::OneTailed => v > threshold,
        TailMode::TwoTailed => v.abs() > threshold,
    };

    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &v) in t.iter().enumerate() {
        match (exceeds(v), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, t.len() - 1));
    }
    runs
}

/// Describe one supra-threshold run.
///
/// Times are offset by `time_offset_ms` so clusters report positions on
/// the original trace even when leading samples were trimmed. Geometry
/// (centroid and areas) follows the trapezoidal rule over |t|; for a
/// single-node cluster the areas are zero.
pub fn build_cluster(
    t: &[f64],
    start: usize,
    end: usize,
    threshold: f64,
    time_offset_ms: f64,
    p_value: f64,
) -> Cluster {
    debug_assert!(start <= end && end < t.len());

    let time = |i: usize| i as f64 * SAMPLE_INTERVAL_MS + time_offset_ms;

    let mut peak_t = t[start];
    let mut weighted_time = 0.0;
    let mut magnitude_sum = 0.0;
    let mut area_above_axis = 0.0;

    for i in start..=end {
        let z = t[i].abs();
        if t[i].abs() > peak_t.abs() {
            peak_t = t[i];
        }
        weighted_time += time(i) * z;
        magnitude_sum += z;
        if i > start {
            area_above_axis += 0.5 * (z + t[i - 1].abs()) * SAMPLE_INTERVAL_MS;
        }
    }

    let nodes = (end - start + 1) as f64;
    let span_ms = time(end) - time(start);

    Cluster {
        start_index: start,
        end_index: end,
        start_time_ms: time(start),
        end_time_ms: time(end),
        peak_t,
        centroid_time_ms: if magnitude_sum > 0.0 {
            weighted_time / magnitude_sum
        } else {
            0.5 * (time(start) + time(end))
        },
        centroid_t: magnitude_sum / nodes,
        area_above_threshold: area_above_axis - threshold * span_ms,
        area_above_axis,
        p_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run_inclusive_bounds() {
        // Exceeds 2.0 exactly on indices [120, 180].
        let t: Vec<f64> = (0..300)
            .map(|i| if (120..=180).contains(&i) { 3.0 } else { 0.5 })
            .collect();
        let runs = supra_threshold_runs(&t, 2.0, TailMode::OneTailed);
        assert_eq!(runs, vec![(120, 180)]);
    }

    #[test]
    fn test_multiple_runs_kept_in_order() {
        let t: Vec<f64> = (0..100)
            .map(|i| {
                if (10..=15).contains(&i) || (40..=60).contains(&i) {
                    4.0
                } else {
                    0.0
                }
            })
            .collect();
        let runs = supra_threshold_runs(&t, 2.0, TailMode::OneTailed);
        assert_eq!(runs, vec![(10, 15), (40, 60)]);
    }

    #[test]
    fn test_run_extends_to_field_end() {
        let t = [0.0, 3.0, 3.0];
        let runs = supra_threshold_runs(&t, 2.0, TailMode::OneTailed);
        assert_eq!(runs, vec![(1, 2)]);
    }

    #[test]
    fn test_one_tailed_ignores_negative_excursions() {
        let t = [0.0, -5.0, 0.0, 5.0, 0.0];
        let one = supra_threshold_runs(&t, 2.0, TailMode::OneTailed);
        assert_eq!(one, vec![(3, 3)]);

        let two = supra_threshold_runs(&t, 2.0, TailMode::TwoTailed);
        assert_eq!(two, vec![(1, 1), (3, 3)]);
    }

    #[test]
    fn test_constant_zero_has_no_runs() {
        let t = vec![0.0; 500];
        assert!(supra_threshold_runs(&t, 1e-9, TailMode::OneTailed).is_empty());
        assert!(supra_threshold_runs(&t, 1e-9, TailMode::TwoTailed).is_empty());
    }

    #[test]
    fn test_cluster_geometry() {
        // Triangle peaking at index 2 with value 4, over threshold 2.
        let t = [0.0, 3.0, 4.0, 3.0, 0.0];
        let cluster = build_cluster(&t, 1, 3, 2.0, 1.0, 0.02);

        assert_eq!(cluster.start_index, 1);
        assert_eq!(cluster.end_index, 3);
        assert!((cluster.start_time_ms - 2.0).abs() < 1e-12);
        assert!((cluster.end_time_ms - 4.0).abs() < 1e-12);
        assert!((cluster.peak_t - 4.0).abs() < 1e-12);
        // Trapezoid: 0.5*(3+4) + 0.5*(4+3) = 7.0.
        assert!((cluster.area_above_axis - 7.0).abs() < 1e-12);
        // Minus threshold band: 7 - 2*2 = 3.
        assert!((cluster.area_above_threshold - 3.0).abs() < 1e-12);
        // Symmetric run: centroid at the peak.
        assert!((cluster.centroid_time_ms - 3.0).abs() < 1e-12);
        assert!((cluster.p_value - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_peak_keeps_sign_for_negative_cluster() {
        let t = [0.0, -3.0, -4.5, -3.0, 0.0];
        let cluster = build_cluster(&t, 1, 3, 2.0, 0.0, 0.5);
        assert!((cluster.peak_t + 4.5).abs() < 1e-12);
        assert!(cluster.centroid_t > 0.0);
    }
}
