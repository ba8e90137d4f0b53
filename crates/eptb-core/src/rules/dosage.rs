//! Weight-based dose checks (simplified WHO weight bands)
//!
//! Isoniazid and Ethambutol doses are carried in the regimen but have no
//! automated rule yet.

use crate::config::GuidelineConfig;
use crate::finding::{Finding, FindingCategory};
use crate::regimen::{Drug, RegimenPlan};

/// Rifampicin (~10 mg/kg) against the weight band.
///
/// A weight exactly on the band is neither under- nor overdosed.
pub fn evaluate_rifampicin(weight_kg: f64, dose_mg: f64, config: &GuidelineConfig) -> Finding {
    let band = config.rifampicin_weight_band_kg;
    let standard = config.rifampicin_standard_dose_mg;
    let low_band = config.rifampicin_low_band_dose_mg;

    if weight_kg > band && dose_mg < standard {
        Finding::warning(
            FindingCategory::Dosage,
            format!(
                "Rifampicin Potential Underdose. Weight > {}kg usually requires {}mg. Prescribed: {}mg.",
                band, standard, dose_mg
            ),
        )
        .recommend(format!("Increase Rifampicin to {}mg daily.", standard))
    } else if weight_kg < band && dose_mg >= standard {
        Finding::warning(
            FindingCategory::Dosage,
            format!(
                "Rifampicin Potential Overdose. Weight < {}kg usually requires {}mg. Prescribed: {}mg.",
                band, low_band, dose_mg
            ),
        )
        .recommend(format!("Reduce Rifampicin to {}mg daily.", low_band))
    } else {
        Finding::pass(
            FindingCategory::Dosage,
            format!("Rifampicin dose ({}mg) appears correct for weight {}kg.", dose_mg, weight_kg),
        )
    }
}

/// Pyrazinamide (~25 mg/kg) within a ±20% tolerance of the weight target
pub fn evaluate_pyrazinamide(weight_kg: f64, dose_mg: f64, config: &GuidelineConfig) -> Finding {
    let target = weight_kg * config.pyrazinamide_mg_per_kg;

    if dose_mg < target * config.pyrazinamide_low_factor {
        Finding::warning(
            FindingCategory::Dosage,
            format!(
                "Pyrazinamide Low. Target based on weight is approx {}mg. Prescribed: {}mg.",
                target, dose_mg
            ),
        )
        .recommend("Risk of subtherapeutic treatment; increase dose towards the weight-based target.")
    } else if dose_mg > target * config.pyrazinamide_high_factor {
        Finding::warning(
            FindingCategory::Dosage,
            format!(
                "Pyrazinamide High. Risk of Hepatotoxicity. Target based on weight is approx {}mg. Prescribed: {}mg.",
                target, dose_mg
            ),
        )
        .recommend("Reduce dose towards the weight-based target and monitor liver function.")
    } else {
        Finding::pass(FindingCategory::Dosage, "Pyrazinamide dose acceptable.")
    }
}

/// Rifampicin then Pyrazinamide, one finding each
pub fn evaluate_dosage(weight_kg: f64, regimen: &RegimenPlan, config: &GuidelineConfig) -> Vec<Finding> {
    vec![
        evaluate_rifampicin(weight_kg, regimen.dose_mg(Drug::Rifampicin), config),
        evaluate_pyrazinamide(weight_kg, regimen.dose_mg(Drug::Pyrazinamide), config),
    ]
}
