//! Signal preprocessing for SPM comparison.
//!
//! Scalar parameter extraction runs on the raw trace; the SPM engine
//! instead receives trimmed, artifact-corrected, optionally normalized
//! windows produced here.

mod artifact;
mod window;

pub use artifact::correct_filter_artifact;
pub use window::{normalize_pair, trim_for_spm};
