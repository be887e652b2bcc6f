//! First-crossing detection with sub-sample interpolation.
//!
//! A crossing search is a sequential scan over an immutable slice that
//! returns a tagged result: `Some(time)` when the level is crossed,
//! `None` when it never is. Missing crossings must stay distinguishable
//! from a legitimate crossing at time zero, so no sentinel values.

use crate::constants::SAMPLE_INTERVAL_MS;

/// Time of the first rising crossing of `level` within `samples[..=limit]`.
///
/// Scans from the start of the window and returns the earliest time at
/// which the signal passes from below `level` (strict inequality at the
/// boundary sample) to at-or-above it, with linear interpolation between
/// the bracketing samples for sub-millisecond precision.
///
/// # Arguments
///
/// * `samples` - Displacement trace
/// * `level` - Amplitude level to cross, in the trace's units
/// * `limit` - Last index considered (inclusive); pass the peak index to
///   restrict the search to the rising edge
///
/// # Returns
///
/// The crossing time in milliseconds, or `None` when the level is never
/// reached inside the window.
pub fn first_rising_crossing(samples: &[f64], level: f64, limit: usize) -> Option<f64> {
    let limit = limit.min(samples.len().saturating_sub(1));
    if samples.is_empty() {
        return None;
    }
    if samples[0] >= level {
        // Already at or above the level at the window onset.
        return Some(0.0);
    }
    for i in 1..=limit {
        let (below, above) = (samples[i - 1], samples[i]);
        if below < level && above >= level {
            let fraction = (level - below) / (above - below);
            return Some((i as f64 - 1.0 + fraction) * SAMPLE_INTERVAL_MS);
        }
    }
    None
}

/// Time of the first falling crossing of `level` at or after `start`.
///
/// Mirror image of [`first_rising_crossing`]: returns the earliest time
/// after the peak at which the signal passes from above `level` (strict
/// inequality) to at-or-below it.
pub fn first_falling_crossing(samples: &[f64], level: f64, start: usize) -> Option<f64> {
    if start >= samples.len() {
        return None;
    }
    for i in (start + 1)..samples.len() {
        let (above, below) = (samples[i - 1], samples[i]);
        if above > level && below <= level {
            let fraction = (above - level) / (above - below);
            return Some((i as f64 - 1.0 + fraction) * SAMPLE_INTERVAL_MS);
        }
    }
    None
}
