//! Scalar statistics for TMG parameter comparison.
//!
//! - Descriptive statistics ([`descriptive`]): mean, Bessel-corrected
//!   standard deviation, percent change
//! - Paired testing ([`paired`]): dependent-samples t-test over matched
//!   pre/post parameter values

mod descriptive;
mod paired;

pub use descriptive::{mean, percent_change, sample_std};
pub use paired::{paired_compare, paired_t_statistic, two_sided_p_value};
