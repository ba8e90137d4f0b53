//! Regimen shape notes. Descriptive only, never gates the verdict.

use crate::classification::EptbType;
use crate::finding::{Finding, FindingCategory};
use crate::regimen::{Drug, RegimenPlan};

pub fn evaluate_structure(eptb_type: EptbType, regimen: &RegimenPlan) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(2);

    if eptb_type == EptbType::TbMeningitis && !regimen.intensive_phase_drugs.contains(&Drug::Streptomycin) {
        findings.push(Finding::info(
            FindingCategory::RegimenStructure,
            "Note: WHO suggests considering Streptomycin in place of Ethambutol for Meningitis in \
             certain cases, though Ethambutol is often used.",
        ));
    }

    findings.push(Finding::pass(
        FindingCategory::RegimenStructure,
        format!(
            "Regimen Structure: {} months Intensive + {} months Continuation matches standard protocol structures.",
            regimen.intensive_phase_months, regimen.continuation_phase_months
        ),
    ));

    findings
}
