//! Side-effect profiles and drug interaction notes
//!
//! Static lookups, not thresholds.

use crate::finding::{Finding, FindingCategory};
use crate::patient::HivStatus;
use crate::regimen::{Drug, RegimenPlan};

/// Drugs with a known adverse-effect profile, in report order
const PROFILED_DRUGS: [Drug; 4] = [Drug::Rifampicin, Drug::Isoniazid, Drug::Pyrazinamide, Drug::Ethambutol];

/// Known adverse-effect profile for a first-line drug
pub fn side_effect_profile(drug: Drug) -> Option<&'static str> {
    match drug {
        Drug::Rifampicin => Some("Orange urine (harmless), Hepatotoxicity, Flu-like syndrome."),
        Drug::Isoniazid => Some("Peripheral neuropathy (Prescribe Pyridoxine/Vit B6), Hepatotoxicity."),
        Drug::Pyrazinamide => Some("Hyperuricemia (Gout), Arthralgia, Hepatotoxicity."),
        Drug::Ethambutol => Some("Optic Neuritis (Check visual acuity/color vision)."),
        Drug::Streptomycin => None,
    }
}

/// One SideEffect finding per profiled drug in the intensive phase
pub fn evaluate_side_effects(regimen: &RegimenPlan) -> Vec<Finding> {
    PROFILED_DRUGS
        .iter()
        .filter(|drug| regimen.intensive_phase_drugs.contains(*drug))
        .filter_map(|&drug| {
            side_effect_profile(drug)
                .map(|profile| Finding::info(FindingCategory::SideEffect, format!("{}: {}", drug.name(), profile)))
        })
        .collect()
}

/// HIV interaction (when positive) followed by the always-on diabetes note.
///
/// The patient record has no diabetes field, so the sulfonylurea note is
/// unconditional.
pub fn evaluate_interactions(hiv_status: HivStatus) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(2);

    if hiv_status.is_positive() {
        findings.push(
            Finding::warning(
                FindingCategory::Interaction,
                "HIV INTERACTION: Rifampicin significantly lowers levels of Protease Inhibitors and NNRTIs.",
            )
            .recommend("Dosage adjustment or switch to Rifabutin may be required."),
        );
    }

    findings.push(
        Finding::info(
            FindingCategory::Interaction,
            "Diabetes: Rifampicin may reduce efficacy of oral hypoglycemics (sulfonylureas).",
        )
        .recommend("Monitor Glucose."),
    );

    findings
}

/// Side effects, then interactions
pub fn evaluate_safety(regimen: &RegimenPlan, hiv_status: HivStatus) -> Vec<Finding> {
    let mut findings = evaluate_side_effects(regimen);
    findings.extend(evaluate_interactions(hiv_status));
    findings
}
