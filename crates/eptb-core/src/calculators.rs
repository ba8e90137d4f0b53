//! Clinical calculators: BMI, Cockcroft-Gault eGFR, renal classification
//!
//! Pure numeric functions. Out-of-range input yields whatever number the
//! formula produces; only a non-positive height is guarded.

use crate::patient::{PatientRecord, Sex};
use serde::{Deserialize, Serialize};

/// eGFR below this is severe renal impairment (mL/min)
pub const SEVERE_RENAL_EGFR: f64 = 30.0;
/// eGFR below this is moderate renal impairment (mL/min)
pub const MODERATE_RENAL_EGFR: f64 = 60.0;

/// Body mass index in kg/m², rounded to 2 decimals. Returns 0 when
/// `height_cm <= 0`.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm > 0.0 {
        let height_m = height_cm / 100.0;
        (weight_kg / (height_m * height_m) * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Cockcroft-Gault creatinine clearance estimate in mL/min (unrounded)
pub fn estimate_egfr(age: u32, weight_kg: f64, sex: Sex, creatinine_mg_dl: f64) -> f64 {
    let sex_factor = match sex {
        Sex::Female => 0.85,
        Sex::Male => 1.0,
    };
    ((140.0 - age as f64) * weight_kg * sex_factor) / (72.0 * creatinine_mg_dl)
}

/// Renal impairment band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenalImpairment {
    Severe,
    Moderate,
    Normal,
}

/// Outcome of renal classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenalAssessment {
    /// Whether dosing needs review for renal function
    pub needs_adjustment: bool,
    pub impairment: RenalImpairment,
    pub message: String,
}

/// Classify renal function with the WHO cut-offs (30 / 60 mL/min).
///
/// Bands are exclusive below: 30.0 is moderate, 60.0 is acceptable.
pub fn classify_renal_function(egfr: f64) -> RenalAssessment {
    classify_renal_function_with(egfr, SEVERE_RENAL_EGFR, MODERATE_RENAL_EGFR)
}

/// Classify renal function against explicit cut-offs
pub fn classify_renal_function_with(egfr: f64, severe_below: f64, moderate_below: f64) -> RenalAssessment {
    if egfr < severe_below {
        RenalAssessment {
            needs_adjustment: true,
            impairment: RenalImpairment::Severe,
            message: "Severe Renal Impairment: Pyrazinamide and Ethambutol require dose/frequency \
                      adjustment (usually 3x/week)."
                .to_string(),
        }
    } else if egfr < moderate_below {
        RenalAssessment {
            needs_adjustment: true,
            impairment: RenalImpairment::Moderate,
            message: "Moderate Renal Impairment: Monitor closely.".to_string(),
        }
    } else {
        RenalAssessment {
            needs_adjustment: false,
            impairment: RenalImpairment::Normal,
            message: "Renal function acceptable.".to_string(),
        }
    }
}

/// Values derived from the patient record before rules run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// kg/m², 0 if height is invalid
    pub bmi: f64,
    /// Cockcroft-Gault estimate, mL/min
    pub egfr_ml_min: f64,
}

impl DerivedMetrics {
    pub fn from_patient(patient: &PatientRecord) -> Self {
        DerivedMetrics {
            bmi: calculate_bmi(patient.weight_kg, patient.height_cm),
            egfr_ml_min: estimate_egfr(
                patient.age,
                patient.weight_kg,
                patient.sex,
                patient.serum_creatinine_mg_dl,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        assert_eq!(calculate_bmi(60.0, 170.0), 20.76);
        assert_eq!(calculate_bmi(70.0, 175.0), 22.86);
    }

    #[test]
    fn test_bmi_zero_height() {
        assert_eq!(calculate_bmi(60.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(60.0, -10.0), 0.0);
    }

    #[test]
    fn test_egfr_reference_value() {
        // (140 - 25) * 60 / (72 * 0.9)
        let egfr = estimate_egfr(25, 60.0, Sex::Male, 0.9);
        assert!((egfr - 106.48).abs() < 0.01, "egfr = {}", egfr);
        assert!(!classify_renal_function(egfr).needs_adjustment);
    }

    #[test]
    fn test_egfr_female_factor() {
        let male = estimate_egfr(40, 70.0, Sex::Male, 1.0);
        let female = estimate_egfr(40, 70.0, Sex::Female, 1.0);
        assert!((female - male * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_renal_boundaries() {
        let severe = classify_renal_function(29.9);
        assert_eq!(severe.impairment, RenalImpairment::Severe);
        assert!(severe.needs_adjustment);
        assert!(severe.message.contains("Pyrazinamide and Ethambutol"));

        let moderate = classify_renal_function(30.0);
        assert_eq!(moderate.impairment, RenalImpairment::Moderate);
        assert!(moderate.needs_adjustment);

        let moderate_top = classify_renal_function(59.99);
        assert_eq!(moderate_top.impairment, RenalImpairment::Moderate);

        let normal = classify_renal_function(60.0);
        assert_eq!(normal.impairment, RenalImpairment::Normal);
        assert!(!normal.needs_adjustment);
    }

    #[test]
    fn test_derived_metrics_from_default_patient() {
        let metrics = DerivedMetrics::from_patient(&PatientRecord::default());
        assert_eq!(metrics.bmi, 20.76);
        assert!((metrics.egfr_ml_min - 106.48).abs() < 0.01);
    }
}
