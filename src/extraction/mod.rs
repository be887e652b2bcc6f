//! TMG parameter extraction.
//!
//! This module derives the scalar contraction parameters of a single
//! displacement trace:
//!
//! 1. **Amplitude parameters** ([`params`]): Dm and the threshold-crossing
//!    times Td, Tc, Ts, Tr
//! 2. **Crossing search** ([`crossing`]): first-crossing detection with
//!    linear sub-sample interpolation
//! 3. **Derivative (RDD) parameters** ([`derivative`]): displacement rate
//!    extremes and their times

mod crossing;
mod derivative;
mod params;

pub use crossing::{first_falling_crossing, first_rising_crossing};
pub use derivative::gradient;
pub use params::{extract, extract_with, Extraction, ExtractionWarning, ParameterVector, TmgParam};
