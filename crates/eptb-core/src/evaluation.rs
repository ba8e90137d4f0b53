//! Evaluation orchestrator
//!
//! Runs every rule evaluator in a fixed order and concatenates their
//! findings:
//!
//! 1. Duration
//! 2. Dosage (Rifampicin, Pyrazinamide)
//! 3. Renal
//! 4. Regimen structure
//! 5. Side effects, then interactions
//!
//! Evaluation is synchronous and side-effect free. It reads no shared
//! state and cannot fail.

use crate::calculators::DerivedMetrics;
use crate::classification::EptbClassification;
use crate::config::GuidelineConfig;
use crate::finding::{EvaluationResult, FindingSeverity};
use crate::patient::PatientRecord;
use crate::regimen::RegimenPlan;
use crate::rules;

/// Evaluate a regimen with the default WHO thresholds
pub fn evaluate(
    patient: &PatientRecord,
    classification: &EptbClassification,
    regimen: &RegimenPlan,
) -> EvaluationResult {
    Evaluator::default().evaluate(patient, classification, regimen)
}

/// Regimen evaluator bound to a set of guideline thresholds
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: GuidelineConfig,
}

impl Evaluator {
    /// Evaluator with custom thresholds
    pub fn new(config: GuidelineConfig) -> Self {
        Evaluator { config }
    }

    /// Thresholds in use
    pub fn config(&self) -> &GuidelineConfig {
        &self.config
    }

    /// Run every rule against one case
    pub fn evaluate(
        &self,
        patient: &PatientRecord,
        classification: &EptbClassification,
        regimen: &RegimenPlan,
    ) -> EvaluationResult {
        let metrics = DerivedMetrics::from_patient(patient);
        log::trace!("derived metrics: bmi={} egfr={:.1}", metrics.bmi, metrics.egfr_ml_min);

        let mut findings = Vec::with_capacity(12);

        findings.push(rules::evaluate_duration(
            classification.eptb_type,
            regimen.intensive_phase_months,
            regimen.continuation_phase_months,
            &self.config,
        ));
        findings.extend(rules::evaluate_dosage(patient.weight_kg, regimen, &self.config));
        findings.push(rules::evaluate_renal(&metrics, &self.config));
        findings.extend(rules::evaluate_structure(classification.eptb_type, regimen));
        findings.extend(rules::evaluate_safety(regimen, patient.hiv_status));

        let result = EvaluationResult { metrics, findings };
        log::debug!(
            "evaluated {} ({}): {} findings, {} fail, {} warning",
            classification.eptb_type,
            regimen.notation(),
            result.findings.len(),
            result.count(FindingSeverity::Fail),
            result.count(FindingSeverity::Warning),
        );
        result
    }
}
