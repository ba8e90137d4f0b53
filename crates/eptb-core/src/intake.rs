//! Intake case document
//!
//! A [`PatientCase`] bundles everything intake collects into one value
//! that is passed into evaluation. Range checks happen here, before the
//! core is called.

use crate::classification::EptbClassification;
use crate::config::GuidelineConfig;
use crate::evaluation::Evaluator;
use crate::finding::EvaluationResult;
use crate::patient::PatientRecord;
use crate::regimen::RegimenPlan;
use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Patient, classification and regimen as collected at intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCase {
    #[serde(default)]
    pub patient: PatientRecord,
    #[serde(default)]
    pub classification: EptbClassification,
    /// Defaults to the standard regimen for the patient's weight
    pub regimen: Option<RegimenPlan>,
}

impl Default for PatientCase {
    fn default() -> Self {
        PatientCase::new(PatientRecord::default(), EptbClassification::default())
    }
}

impl PatientCase {
    /// New case with the standard regimen for the patient's weight
    pub fn new(patient: PatientRecord, classification: EptbClassification) -> Self {
        let regimen = RegimenPlan::standard(patient.weight_kg);
        PatientCase { patient, classification, regimen: Some(regimen) }
    }

    /// Replace the prescribed regimen
    pub fn with_regimen(mut self, regimen: RegimenPlan) -> Self {
        self.regimen = Some(regimen);
        self
    }

    /// Prescribed regimen, or the standard one when none was entered
    pub fn regimen(&self) -> RegimenPlan {
        self.regimen_with(&GuidelineConfig::default())
    }

    /// Prescribed regimen, or the standard one for the configured weight band
    pub fn regimen_with(&self, config: &GuidelineConfig) -> RegimenPlan {
        self.regimen
            .clone()
            .unwrap_or_else(|| RegimenPlan::standard_with(self.patient.weight_kg, config))
    }

    /// Parse and validate a case document
    pub fn from_json_str(json: &str) -> Result<Self, EptbError> {
        let case: PatientCase = serde_json::from_str(json)?;
        case.validate()?;
        Ok(case)
    }

    /// Read and validate a case document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EptbError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Pretty JSON, as used by the template command
    pub fn to_json_pretty(&self) -> Result<String, EptbError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject any field outside its intake range
    pub fn validate(&self) -> Result<(), EptbError> {
        self.patient.validate()?;
        if let Some(regimen) = &self.regimen {
            regimen.validate()?;
        }
        Ok(())
    }

    /// Evaluate this case
    pub fn evaluate_with(&self, evaluator: &Evaluator) -> EvaluationResult {
        evaluator.evaluate(&self.patient, &self.classification, &self.regimen_with(evaluator.config()))
    }
}
