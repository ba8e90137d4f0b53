//! Total treatment duration against the per-site minimum

use crate::classification::EptbType;
use crate::config::GuidelineConfig;
use crate::finding::{Finding, FindingCategory};

/// Produce exactly one Duration finding.
///
/// Meningitis and bone/joint disease fail below the extended minimum (9);
/// every other site fails below the standard minimum (6). Hard cut-offs.
pub fn evaluate_duration(
    eptb_type: EptbType,
    intensive_phase_months: u32,
    continuation_phase_months: u32,
    config: &GuidelineConfig,
) -> Finding {
    let total = intensive_phase_months.saturating_add(continuation_phase_months);

    if eptb_type.requires_extended_course() && total < config.extended_course_min_months {
        Finding::fail(
            FindingCategory::Duration,
            format!(
                "INCORRECT DURATION: Patient has {}. WHO Guidelines mandate {}-{} months. Prescribed: {} months.",
                eptb_type,
                config.extended_course_min_months,
                eptb_type.required_duration_months(),
                total
            ),
        )
        .recommend("Extend Continuation Phase.")
    } else if !eptb_type.requires_extended_course() && total < config.standard_course_min_months {
        Finding::fail(
            FindingCategory::Duration,
            format!(
                "INCORRECT DURATION: Standard EPTB requires minimum {} months. Prescribed: {} months.",
                config.standard_course_min_months, total
            ),
        )
        .recommend(format!(
            "Extend Continuation Phase to reach at least {} months in total.",
            config.standard_course_min_months
        ))
    } else {
        Finding::pass(
            FindingCategory::Duration,
            format!("Duration ({} months) is appropriate for {}.", total, eptb_type),
        )
    }
}
