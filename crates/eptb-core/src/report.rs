//! Clinical report rendering
//!
//! Formats an [`EvaluationResult`] as a plain-text or JSON document.
//! Finding messages and recommendations are reproduced verbatim.

use crate::classification::EptbClassification;
use crate::finding::{EvaluationResult, Finding, FindingCategory, FindingSeverity, RegimenStatus};
use crate::patient::PatientRecord;
use crate::regimen::RegimenPlan;
use crate::EptbError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub const REPORT_TITLE: &str = "EPTB Clinical Decision Report";

/// Everything a report needs, borrowed from the caller
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub patient: &'a PatientRecord,
    pub classification: &'a EptbClassification,
    pub regimen: &'a RegimenPlan,
    pub result: &'a EvaluationResult,
}

impl<'a> ReportInput<'a> {
    /// Categories in the order they first appear in the result
    fn sections(&self) -> Vec<FindingCategory> {
        let mut sections = Vec::new();
        for finding in &self.result.findings {
            if !sections.contains(&finding.category) {
                sections.push(finding.category);
            }
        }
        sections
    }

    fn reasoning(&self) -> String {
        let fails = self.result.count(FindingSeverity::Fail);
        let warnings = self.result.count(FindingSeverity::Warning);
        match self.result.status() {
            RegimenStatus::Appropriate => "All guideline checks passed.".to_string(),
            _ => format!("{} failed check(s), {} warning(s). See detailed analysis.", fails, warnings),
        }
    }
}

/// Plain-text report, rendered through `Display`
pub struct TextReport<'a> {
    input: ReportInput<'a>,
    date: NaiveDate,
}

impl<'a> TextReport<'a> {
    /// Report dated `date`
    pub fn new(input: ReportInput<'a>, date: NaiveDate) -> Self {
        TextReport { input, date }
    }
}

fn write_finding(f: &mut fmt::Formatter<'_>, finding: &Finding) -> fmt::Result {
    writeln!(f, "  [{}] {}", finding.severity, finding.message)?;
    if let Some(recommendation) = &finding.recommendation {
        writeln!(f, "      Recommendation: {}", recommendation)?;
    }
    Ok(())
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ReportInput { patient, classification, regimen, result } = self.input;

        writeln!(f, "{}", REPORT_TITLE)?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f)?;

        writeln!(f, "1. Patient Summary")?;
        writeln!(f, "Patient: {}", patient.display_name())?;
        writeln!(
            f,
            "Age: {} | Sex: {} | Weight: {}kg | EPTB Type: {}",
            patient.age, patient.sex, patient.weight_kg, classification.eptb_type
        )?;
        writeln!(
            f,
            "Severity: {} | HIV: {} | BMI: {:.2} kg/m2 | eGFR: {:.1} mL/min",
            classification.severity, patient.hiv_status, result.metrics.bmi, result.metrics.egfr_ml_min
        )?;
        writeln!(
            f,
            "Regimen: {} (guideline duration: {} months)",
            regimen.notation(),
            classification.required_duration_months()
        )?;
        writeln!(f)?;

        writeln!(f, "2. Regimen Evaluation")?;
        writeln!(f, "Status: {}", result.status())?;
        writeln!(f, "Reasoning: {}", self.input.reasoning())?;

        for (index, category) in self.input.sections().into_iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "2.{} {}", index + 1, category.title())?;
            for finding in result.by_category(category) {
                write_finding(f, finding)?;
            }
        }
        Ok(())
    }
}

/// Render the plain-text report
pub fn render_text(input: ReportInput<'_>, date: NaiveDate) -> String {
    TextReport::new(input, date).to_string()
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    title: &'static str,
    date: NaiveDate,
    patient_name: &'a str,
    patient: &'a PatientRecord,
    classification: &'a EptbClassification,
    regimen: String,
    required_duration_months: u32,
    status: RegimenStatus,
    reasoning: String,
    bmi: f64,
    egfr_ml_min: f64,
    findings: &'a [Finding],
}

/// Render the report as pretty JSON
pub fn render_json(input: ReportInput<'_>, date: NaiveDate) -> Result<String, EptbError> {
    let document = ReportDocument {
        title: REPORT_TITLE,
        date,
        patient_name: input.patient.display_name(),
        patient: input.patient,
        classification: input.classification,
        regimen: input.regimen.notation(),
        required_duration_months: input.classification.required_duration_months(),
        status: input.result.status(),
        reasoning: input.reasoning(),
        bmi: input.result.metrics.bmi,
        egfr_ml_min: input.result.metrics.egfr_ml_min,
        findings: &input.result.findings,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// "EPTB_Report_<name>.txt", with path-unsafe characters replaced
pub fn report_file_name(patient: &PatientRecord) -> String {
    let name: String = patient
        .display_name()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("EPTB_Report_{}.txt", name)
}
