//! Renal dosing review from the estimated GFR

use crate::calculators::{classify_renal_function_with, DerivedMetrics, RenalImpairment};
use crate::config::GuidelineConfig;
use crate::finding::{Finding, FindingCategory};

pub fn evaluate_renal(metrics: &DerivedMetrics, config: &GuidelineConfig) -> Finding {
    let egfr = metrics.egfr_ml_min;
    let assessment = classify_renal_function_with(egfr, config.severe_renal_egfr, config.moderate_renal_egfr);

    match assessment.impairment {
        RenalImpairment::Severe => Finding::warning(
            FindingCategory::Renal,
            format!("{} Estimated eGFR: {:.1} mL/min.", assessment.message, egfr),
        )
        .recommend("Give Pyrazinamide and Ethambutol three times weekly instead of daily."),
        RenalImpairment::Moderate => Finding::warning(
            FindingCategory::Renal,
            format!("{} Estimated eGFR: {:.1} mL/min.", assessment.message, egfr),
        )
        .recommend("Monitor renal function during treatment."),
        RenalImpairment::Normal => Finding::pass(
            FindingCategory::Renal,
            format!("Estimated eGFR: {:.1} mL/min (Renal Function OK).", egfr),
        ),
    }
}
