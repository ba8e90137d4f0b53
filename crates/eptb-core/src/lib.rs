//! EPTB Core - Regimen Evaluation Engine
//!
//! Pure Rust clinical decision support for extrapulmonary tuberculosis
//! (EPTB) treatment regimens, checked against WHO guideline thresholds.
//!
//! # Features
//!
//! - Clinical calculators (BMI, Cockcroft-Gault eGFR, renal classification)
//! - Treatment duration rule per EPTB site
//! - Weight-based Rifampicin and Pyrazinamide dose checks
//! - Regimen structure, side-effect and drug interaction notes
//! - Plain-text / JSON report rendering
//! - Descriptive statistics over patient cohorts (CSV)
//!
//! # Example
//!
//! ```rust
//! use eptb_core::{evaluate, EptbClassification, EptbType, PatientRecord, RegimenPlan};
//!
//! let patient = PatientRecord::default();
//! let classification = EptbClassification::new(EptbType::TbMeningitis);
//! let regimen = RegimenPlan::standard(patient.weight_kg);
//!
//! let result = evaluate(&patient, &classification, &regimen);
//! assert!(result.has_failures()); // 2 + 4 months is too short for meningitis
//! ```

pub mod calculators;
pub mod classification;
pub mod cohort;
pub mod config;
pub mod evaluation;
pub mod finding;
pub mod intake;
pub mod patient;
pub mod regimen;
pub mod report;
pub mod rules;

// Re-export commonly used types for convenience
pub use calculators::{
    calculate_bmi, classify_renal_function, estimate_egfr,
    DerivedMetrics, RenalAssessment, RenalImpairment,
};
pub use classification::{ClinicalSeverity, EptbClassification, EptbType};
pub use cohort::{CohortReader, CohortRow, CohortSummary};
pub use config::GuidelineConfig;
pub use evaluation::{evaluate, Evaluator};
pub use finding::{EvaluationResult, Finding, FindingCategory, FindingSeverity, RegimenStatus};
pub use intake::PatientCase;
pub use patient::{HivStatus, PatientRecord, Sex};
pub use regimen::{Drug, RegimenPlan};
pub use report::ReportInput;

/// Errors raised outside the evaluation core (intake, config, cohort I/O)
#[derive(Debug, thiserror::Error)]
pub enum EptbError {
    /// A numeric field lies outside its declared bound
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    InvalidInputRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A label did not match any known variant
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
    /// A cohort row could not be parsed
    #[error("malformed cohort row at line {line}: {reason}")]
    MalformedCohort { line: usize, reason: String },
    /// A required cohort column is absent from the header
    #[error("missing cohort column: {0}")]
    MissingColumn(String),
    /// Cohort file had a header but no rows
    #[error("cohort contains no patient rows")]
    EmptyCohort,
    /// Inconsistent guideline configuration
    #[error("invalid guideline configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
