//! Scalar contraction parameters of one displacement trace.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdFractions;
use crate::constants::SAMPLE_INTERVAL_MS;
use crate::error::AnalysisError;
use crate::types::Measurement;

use super::crossing::{first_falling_crossing, first_rising_crossing};
use super::derivative::gradient;

/// Canonical TMG/RDD parameter names, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TmgParam {
    /// Maximum displacement amplitude \[mm\].
    Dm,
    /// Delay time: onset to 10 % of Dm \[ms\].
    Td,
    /// Contraction time: 10 % to 90 % of Dm on the rising edge \[ms\].
    Tc,
    /// Sustain time: duration the trace stays at or above 50 % of Dm \[ms\].
    Ts,
    /// Half-relaxation time: peak to the falling 50 % crossing \[ms\].
    Tr,
    /// Maximum displacement rate on the rising edge \[mm/ms\].
    RddMax,
    /// Minimum (most negative) displacement rate after the peak \[mm/ms\].
    RddMin,
    /// RddMax − RddMin \[mm/ms\].
    RddPeakToPeak,
    /// Time of RddMax \[ms\].
    RddMaxTime,
    /// Time of RddMin \[ms\].
    RddMinTime,
    /// Time from RddMax to RddMin \[ms\].
    MaxToMinTime,
}

impl TmgParam {
    /// All parameters in canonical order.
    pub const ALL: [TmgParam; 11] = [
        TmgParam::Dm,
        TmgParam::Td,
        TmgParam::Tc,
        TmgParam::Ts,
        TmgParam::Tr,
        TmgParam::RddMax,
        TmgParam::RddMin,
        TmgParam::RddPeakToPeak,
        TmgParam::RddMaxTime,
        TmgParam::RddMinTime,
        TmgParam::MaxToMinTime,
    ];

    /// Short display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TmgParam::Dm => "Dm",
            TmgParam::Td => "Td",
            TmgParam::Tc => "Tc",
            TmgParam::Ts => "Ts",
            TmgParam::Tr => "Tr",
            TmgParam::RddMax => "RDD max",
            TmgParam::RddMin => "RDD min",
            TmgParam::RddPeakToPeak => "RDD peak-to-peak",
            TmgParam::RddMaxTime => "RDD max time",
            TmgParam::RddMinTime => "RDD min time",
            TmgParam::MaxToMinTime => "RDD max-to-min time",
        }
    }
}

impl std::fmt::Display for TmgParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar parameters of one measurement.
///
/// Threshold-dependent times are `Option`: a trace without a clear rise
/// has no Td, and that absence must not be confused with a crossing at
/// time zero. Amplitude and derivative parameters always exist for a
/// valid twitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    /// Maximum displacement amplitude \[mm\].
    pub dm: f64,
    /// Delay time \[ms\].
    pub td: Option<f64>,
    /// Contraction time \[ms\].
    pub tc: Option<f64>,
    /// Sustain time \[ms\].
    pub ts: Option<f64>,
    /// Half-relaxation time \[ms\].
    pub tr: Option<f64>,
    /// Maximum displacement rate on the rising edge \[mm/ms\].
    pub rdd_max: f64,
    /// Most negative displacement rate after the peak \[mm/ms\].
    pub rdd_min: f64,
    /// RddMax − RddMin \[mm/ms\].
    pub rdd_peak_to_peak: f64,
    /// Time of the rate maximum \[ms\].
    pub rdd_max_time: f64,
    /// Time of the rate minimum \[ms\].
    pub rdd_min_time: f64,
    /// Time from rate maximum to rate minimum \[ms\].
    pub max_to_min_time: f64,
}

impl ParameterVector {
    /// Value of one parameter; `None` when a threshold crossing was not
    /// found for that trace.
    pub fn get(&self, param: TmgParam) -> Option<f64> {
        match param {
            TmgParam::Dm => Some(self.dm),
            TmgParam::Td => self.td,
            TmgParam::Tc => self.tc,
            TmgParam::Ts => self.ts,
            TmgParam::Tr => self.tr,
            TmgParam::RddMax => Some(self.rdd_max),
            TmgParam::RddMin => Some(self.rdd_min),
            TmgParam::RddPeakToPeak => Some(self.rdd_peak_to_peak),
            TmgParam::RddMaxTime => Some(self.rdd_max_time),
            TmgParam::RddMinTime => Some(self.rdd_min_time),
            TmgParam::MaxToMinTime => Some(self.max_to_min_time),
        }
    }
}

/// A threshold crossing that could not be located.
///
/// Recorded, never raised: downstream statistics exclude the affected
/// unit from the affected parameter only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    /// Parameter reported as missing.
    pub parameter: TmgParam,
    /// What went wrong, for logging and reporting.
    pub message: String,
}

/// Extraction output: the parameter vector plus any recorded warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted parameters.
    pub params: ParameterVector,
    /// Missing-crossing records.
    pub warnings: Vec<ExtractionWarning>,
}

/// Extract the parameter vector of one measurement with default
/// threshold fractions.
///
/// Deterministic, pure function of the trace. See [`extract_with`].
pub fn extract(measurement: &Measurement) -> Result<Extraction, AnalysisError> {
    extract_with(&measurement.samples, &ThresholdFractions::default())
}

/// Extract the parameter vector of one displacement trace.
///
/// # Algorithm
///
/// 1. Locate the global maximum Dm and its index; the first occurrence
///    wins on ties.
/// 2. Find the rising crossings of `lower`, `sustain`, and `upper`
///    fractions of Dm (first crossing, linear interpolation) restricted
///    to the rising edge.
/// 3. Td, Tc from the lower/upper crossings; Ts, Tr from the rising and
///    falling sustain crossings.
/// 4. Differentiate the trace (centered differences) and take the rate
///    extreme on the rising edge (RddMax) and the most negative rate
///    after the peak (RddMin).
///
/// # Errors
///
/// `InvalidSignal` for an empty trace or a non-positive maximum; a
/// missing threshold crossing is a recorded warning, not an error.
pub fn extract_with(
    samples: &[f64],
    thresholds: &ThresholdFractions,
) -> Result<Extraction, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidSignal("empty trace".into()));
    }

    let (i_max, dm) = peak(samples);
    if dm <= 0.0 {
        return Err(AnalysisError::InvalidSignal(format!(
            "non-positive maximum displacement ({:.4} mm); not a twitch",
            dm
        )));
    }

    let mut warnings = Vec::new();
    let mut missing = |parameter: TmgParam, message: String| {
        warnings.push(ExtractionWarning { parameter, message });
    };

    let t_lower = first_rising_crossing(samples, thresholds.lower * dm, i_max);
    let t_sustain_rise = first_rising_crossing(samples, thresholds.sustain * dm, i_max);
    let t_upper = first_rising_crossing(samples, thresholds.upper * dm, i_max);
    let t_sustain_fall = first_falling_crossing(samples, thresholds.sustain * dm, i_max);

    let td = t_lower;
    if td.is_none() {
        missing(
            TmgParam::Td,
            format!("no rising {:.0} % crossing", 100.0 * thresholds.lower),
        );
    }

    let tc = match (t_lower, t_upper) {
        (Some(lo), Some(hi)) => Some(hi - lo),
        _ => {
            missing(
                TmgParam::Tc,
                format!(
                    "rising {:.0} %–{:.0} % interval not bracketed",
                    100.0 * thresholds.lower,
                    100.0 * thresholds.upper
                ),
            );
            None
        }
    };

    let ts = match (t_sustain_rise, t_sustain_fall) {
        (Some(rise), Some(fall)) => Some(fall - rise),
        _ => {
            missing(
                TmgParam::Ts,
                format!(
                    "signal does not bracket the {:.0} % sustain interval",
                    100.0 * thresholds.sustain
                ),
            );
            None
        }
    };

    let t_peak = i_max as f64 * SAMPLE_INTERVAL_MS;
    let tr = match t_sustain_fall {
        Some(fall) => Some(fall - t_peak),
        None => {
            missing(
                TmgParam::Tr,
                format!(
                    "no falling {:.0} % crossing after the peak",
                    100.0 * thresholds.sustain
                ),
            );
            None
        }
    };

    // Rate-of-displacement-development parameters.
    let rate = gradient(samples, SAMPLE_INTERVAL_MS);
    let (i_rdd_max, rdd_max) = signed_extreme(&rate[..=i_max]);
    let (i_rdd_min_rel, rdd_min) = minimum(&rate[i_max..]);
    let i_rdd_min = i_max + i_rdd_min_rel;

    let rdd_max_time = i_rdd_max as f64 * SAMPLE_INTERVAL_MS;
    let rdd_min_time = i_rdd_min as f64 * SAMPLE_INTERVAL_MS;

    let params = ParameterVector {
        dm,
        td,
        tc,
        ts,
        tr,
        rdd_max,
        rdd_min,
        rdd_peak_to_peak: rdd_max - rdd_min,
        rdd_max_time,
        rdd_min_time,
        max_to_min_time: rdd_min_time - rdd_max_time,
    };

    Ok(Extraction { params, warnings })
}

/// Index and value of the global maximum; first occurrence wins.
fn peak(samples: &[f64]) -> (usize, f64) {
    let mut i_max = 0;
    let mut max = samples[0];
    for (i, &v) in samples.iter().enumerate().skip(1) {
        if v > max {
            i_max = i;
            max = v;
        }
    }
    (i_max, max)
}

/// Index and signed value of the largest-magnitude sample.
fn signed_extreme(values: &[f64]) -> (usize, f64) {
    let mut i_ext = 0;
    let mut ext = values[0];
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v.abs() > ext.abs() {
            i_ext = i;
            ext = v;
        }
    }
    (i_ext, ext)
}

/// Index and value of the minimum; first occurrence wins.
fn minimum(values: &[f64]) -> (usize, f64) {
    let mut i_min = 0;
    let mut min = values[0];
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < min {
            i_min = i;
            min = v;
        }
    }
    (i_min, min)
}
