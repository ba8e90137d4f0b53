//! Rule evaluators
//!
//! Each evaluator is a pure function from patient/regimen data to one or
//! more [`Finding`](crate::Finding)s. None of them can fail: missing
//! doses read as 0 and still produce a verdict.

pub mod dosage;
pub mod duration;
pub mod renal;
pub mod safety;
pub mod structure;

pub use dosage::{evaluate_dosage, evaluate_pyrazinamide, evaluate_rifampicin};
pub use duration::evaluate_duration;
pub use renal::evaluate_renal;
pub use safety::{evaluate_interactions, evaluate_safety, evaluate_side_effects, side_effect_profile};
pub use structure::evaluate_structure;
