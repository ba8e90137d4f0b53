//! Property-Based Tests for the Evaluation Engine
//!
//! These tests verify invariants that must hold for every input in the
//! intake ranges:
//! - BMI is non-negative, and exactly 0 when height is not positive
//! - Evaluation is deterministic and always emits the fixed category order
//! - Duration and dose verdicts follow their thresholds
//!
//! Uses proptest for randomized property testing with shrinking.

use eptb_core::{EptbType, FindingCategory, HivStatus, PatientRecord, RegimenPlan, Sex};

/// Category sequence with runs collapsed, e.g. [Duration, Dosage, Renal, ...]
pub fn category_runs(categories: &[FindingCategory]) -> Vec<FindingCategory> {
    let mut runs: Vec<FindingCategory> = Vec::new();
    for category in categories {
        if runs.last() != Some(category) {
            runs.push(*category);
        }
    }
    runs
}

/// Build a patient from raw generated values
pub fn patient_from(age: u32, weight_kg: f64, height_cm: f64, creatinine: f64, female: bool, hiv: bool) -> PatientRecord {
    PatientRecord {
        name: None,
        age,
        sex: if female { Sex::Female } else { Sex::Male },
        weight_kg,
        height_cm,
        serum_creatinine_mg_dl: creatinine,
        hiv_status: if hiv { HivStatus::Positive } else { HivStatus::Negative },
        liver_disease: false,
    }
}

/// Regimen with the given phases and R/Z doses
pub fn regimen_from(ip: u32, cp: u32, rifampicin: f64, pyrazinamide: f64) -> RegimenPlan {
    use eptb_core::Drug;
    RegimenPlan::standard(60.0)
        .with_durations(ip, cp)
        .with_dose(Drug::Rifampicin, rifampicin)
        .with_dose(Drug::Pyrazinamide, pyrazinamide)
}

pub fn eptb_type_at(index: usize) -> EptbType {
    EptbType::ALL[index % EptbType::ALL.len()]
}

#[cfg(test)]
mod calculator_properties {
    use eptb_core::calculate_bmi;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bmi_is_non_negative(weight in 1.0f64..200.0, height in -50.0f64..250.0) {
            prop_assert!(calculate_bmi(weight, height) >= 0.0);
        }

        #[test]
        fn bmi_is_zero_without_height(weight in 0.0f64..200.0, height in -100.0f64..=0.0) {
            prop_assert_eq!(calculate_bmi(weight, height), 0.0);
        }

        #[test]
        fn bmi_is_rounded_to_two_decimals(weight in 1.0f64..200.0, height in 50.0f64..250.0) {
            let bmi = calculate_bmi(weight, height);
            prop_assert!(((bmi * 100.0).round() - bmi * 100.0).abs() < 1e-6);
        }
    }
}

#[cfg(test)]
mod evaluation_properties {
    use super::*;
    use eptb_core::{evaluate, EptbClassification, FindingSeverity};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn evaluation_is_deterministic_and_ordered(
            age in 0u32..=120,
            weight in 1.0f64..=200.0,
            height in 50.0f64..=250.0,
            creatinine in 0.1f64..=20.0,
            female in any::<bool>(),
            hiv in any::<bool>(),
            type_index in 0usize..8,
            ip in 1u32..=12,
            cp in 1u32..=24,
            rifampicin in 0.0f64..1500.0,
            pyrazinamide in 0.0f64..4000.0,
        ) {
            let patient = patient_from(age, weight, height, creatinine, female, hiv);
            let classification = EptbClassification::new(eptb_type_at(type_index));
            let regimen = regimen_from(ip, cp, rifampicin, pyrazinamide);

            let first = evaluate(&patient, &classification, &regimen);
            let second = evaluate(&patient, &classification, &regimen);
            prop_assert_eq!(&first, &second);

            let categories: Vec<FindingCategory> = first.findings.iter().map(|f| f.category).collect();
            prop_assert_eq!(
                category_runs(&categories),
                vec![
                    FindingCategory::Duration,
                    FindingCategory::Dosage,
                    FindingCategory::Renal,
                    FindingCategory::RegimenStructure,
                    FindingCategory::SideEffect,
                    FindingCategory::Interaction,
                ]
            );

            // Info findings never gate the verdict
            let gating = first.findings.iter().any(|f| matches!(f.severity, FindingSeverity::Fail | FindingSeverity::Warning));
            prop_assert_eq!(gating, first.status() != eptb_core::RegimenStatus::Appropriate);
        }

        #[test]
        fn duration_fails_exactly_below_site_minimum(
            type_index in 0usize..8,
            ip in 1u32..=12,
            cp in 1u32..=24,
        ) {
            let eptb_type = eptb_type_at(type_index);
            let result = evaluate(
                &PatientRecord::default(),
                &EptbClassification::new(eptb_type),
                &regimen_from(ip, cp, 600.0, 1500.0),
            );
            let minimum = if eptb_type.requires_extended_course() { 9 } else { 6 };
            let duration = result.findings[0].severity;

            prop_assert_eq!(duration == FindingSeverity::Fail, ip + cp < minimum);
        }

        #[test]
        fn pyrazinamide_passes_inside_tolerance(weight in 30.0f64..120.0, factor in 0.8f64..=1.2) {
            let patient = PatientRecord { weight_kg: weight, ..Default::default() };
            let dose = weight * 25.0 * factor;
            let result = evaluate(
                &patient,
                &EptbClassification::default(),
                &regimen_from(2, 4, if weight > 50.0 { 600.0 } else { 450.0 }, dose),
            );
            let pyrazinamide = result.by_category(FindingCategory::Dosage).nth(1).map(|f| f.severity);

            // Keep clear of float rounding right at the edges
            prop_assume!((factor - 0.8).abs() > 1e-9 && (factor - 1.2).abs() > 1e-9);
            prop_assert_eq!(pyrazinamide, Some(FindingSeverity::Pass));
        }
    }
}
