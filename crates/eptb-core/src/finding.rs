//! Findings and the evaluation result
//!
//! A [`Finding`] is one atomic verdict from a rule evaluator. An
//! [`EvaluationResult`] is the ordered sequence of findings from one
//! evaluation, together with the metrics they were derived from.

use crate::calculators::DerivedMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Area of the regimen a finding concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingCategory {
    Duration,
    Dosage,
    RegimenStructure,
    Renal,
    SideEffect,
    Interaction,
}

impl FindingCategory {
    /// Section title used by reports
    pub fn title(&self) -> &'static str {
        match self {
            FindingCategory::Duration => "Duration Analysis",
            FindingCategory::Dosage => "Dosage Verification",
            FindingCategory::RegimenStructure => "Regimen Appropriateness",
            FindingCategory::Renal => "Renal Function",
            FindingCategory::SideEffect => "Predicted Side Effects",
            FindingCategory::Interaction => "Interaction Checker",
        }
    }
}

/// Verdict level of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingSeverity {
    /// Descriptive note, never gates the verdict
    Info,
    /// Needs clinician review
    Warning,
    /// Violates a guideline threshold
    Fail,
    /// Meets the guideline threshold
    Pass,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingSeverity::Info => write!(f, "INFO"),
            FindingSeverity::Warning => write!(f, "WARNING"),
            FindingSeverity::Fail => write!(f, "FAIL"),
            FindingSeverity::Pass => write!(f, "PASS"),
        }
    }
}

/// One verdict produced by a rule evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub severity: FindingSeverity,
    /// Human-readable verdict
    pub message: String,
    /// Suggested action, if any
    pub recommendation: Option<String>,
}

impl Finding {
    /// Finding without a recommendation
    pub fn new(category: FindingCategory, severity: FindingSeverity, message: impl Into<String>) -> Self {
        Finding {
            category,
            severity,
            message: message.into(),
            recommendation: None,
        }
    }

    /// Guideline threshold met
    pub fn pass(category: FindingCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingSeverity::Pass, message)
    }

    /// Descriptive note
    pub fn info(category: FindingCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingSeverity::Info, message)
    }

    /// Needs clinician review
    pub fn warning(category: FindingCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingSeverity::Warning, message)
    }

    /// Guideline threshold violated
    pub fn fail(category: FindingCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingSeverity::Fail, message)
    }

    /// Attach a recommendation
    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Overall verdict folded from all findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimenStatus {
    /// No warnings or failures
    Appropriate,
    /// At least one warning, no failures
    ReviewRequired,
    /// At least one failure
    Inappropriate,
}

impl RegimenStatus {
    /// Human-readable verdict
    pub fn description(&self) -> &'static str {
        match self {
            RegimenStatus::Appropriate => "Regimen consistent with WHO guideline thresholds",
            RegimenStatus::ReviewRequired => "Review Required",
            RegimenStatus::Inappropriate => "Regimen does not meet WHO guideline thresholds",
        }
    }
}

impl fmt::Display for RegimenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Ordered findings from one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub metrics: DerivedMetrics,
    pub findings: Vec<Finding>,
}

impl EvaluationResult {
    /// Any Fail finding present
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.severity == FindingSeverity::Fail)
    }

    /// Any Warning finding present
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity == FindingSeverity::Warning)
    }

    /// Number of findings at the given severity
    pub fn count(&self, severity: FindingSeverity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Findings of one category, in evaluation order
    pub fn by_category(&self, category: FindingCategory) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    /// Overall verdict: Fail beats Warning beats everything else
    pub fn status(&self) -> RegimenStatus {
        if self.has_failures() {
            RegimenStatus::Inappropriate
        } else if self.has_warnings() {
            RegimenStatus::ReviewRequired
        } else {
            RegimenStatus::Appropriate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(findings: Vec<Finding>) -> EvaluationResult {
        EvaluationResult {
            metrics: DerivedMetrics { bmi: 20.0, egfr_ml_min: 100.0 },
            findings,
        }
    }

    #[test]
    fn test_status_folding() {
        let ok = result_with(vec![
            Finding::pass(FindingCategory::Duration, "ok"),
            Finding::info(FindingCategory::SideEffect, "note"),
        ]);
        assert_eq!(ok.status(), RegimenStatus::Appropriate);

        let review = result_with(vec![
            Finding::pass(FindingCategory::Duration, "ok"),
            Finding::warning(FindingCategory::Dosage, "low"),
        ]);
        assert_eq!(review.status(), RegimenStatus::ReviewRequired);

        let bad = result_with(vec![
            Finding::fail(FindingCategory::Duration, "short"),
            Finding::warning(FindingCategory::Dosage, "low"),
        ]);
        assert_eq!(bad.status(), RegimenStatus::Inappropriate);
    }

    #[test]
    fn test_counts_and_categories() {
        let result = result_with(vec![
            Finding::warning(FindingCategory::Dosage, "a"),
            Finding::pass(FindingCategory::Dosage, "b"),
            Finding::info(FindingCategory::Interaction, "c"),
        ]);
        assert_eq!(result.count(FindingSeverity::Warning), 1);
        assert_eq!(result.count(FindingSeverity::Fail), 0);
        let dosage: Vec<_> = result.by_category(FindingCategory::Dosage).map(|f| f.message.as_str()).collect();
        assert_eq!(dosage, vec!["a", "b"]);
    }

    #[test]
    fn test_recommendation_builder() {
        let finding = Finding::fail(FindingCategory::Duration, "too short").recommend("Extend");
        assert_eq!(finding.recommendation.as_deref(), Some("Extend"));
        assert_eq!(finding.severity.to_string(), "FAIL");
    }
}
