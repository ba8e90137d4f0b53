//! EPTB site classification and clinical severity

use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Site of extrapulmonary TB infection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum EptbType {
    #[default]
    #[serde(rename = "Pleural TB")]
    PleuralTb,
    #[serde(rename = "Lymph Node TB")]
    LymphNodeTb,
    #[serde(rename = "Abdominal TB")]
    AbdominalTb,
    #[serde(rename = "Genitourinary TB")]
    GenitourinaryTb,
    #[serde(rename = "Pericardial TB")]
    PericardialTb,
    #[serde(rename = "Bone/Joint TB")]
    BoneJointTb,
    #[serde(rename = "TB Meningitis")]
    TbMeningitis,
    #[serde(rename = "Disseminated TB")]
    DisseminatedTb,
}

impl EptbType {
    /// All sites, in intake display order
    pub const ALL: [EptbType; 8] = [
        EptbType::PleuralTb,
        EptbType::LymphNodeTb,
        EptbType::AbdominalTb,
        EptbType::GenitourinaryTb,
        EptbType::PericardialTb,
        EptbType::BoneJointTb,
        EptbType::TbMeningitis,
        EptbType::DisseminatedTb,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EptbType::PleuralTb => "Pleural TB",
            EptbType::LymphNodeTb => "Lymph Node TB",
            EptbType::AbdominalTb => "Abdominal TB",
            EptbType::GenitourinaryTb => "Genitourinary TB",
            EptbType::PericardialTb => "Pericardial TB",
            EptbType::BoneJointTb => "Bone/Joint TB",
            EptbType::TbMeningitis => "TB Meningitis",
            EptbType::DisseminatedTb => "Disseminated TB",
        }
    }

    /// CNS and bone/joint disease require the extended 9-12 month course
    pub fn requires_extended_course(&self) -> bool {
        matches!(self, EptbType::TbMeningitis | EptbType::BoneJointTb)
    }

    /// Recommended total treatment duration in months
    pub fn required_duration_months(&self) -> u32 {
        if self.requires_extended_course() {
            12
        } else {
            6
        }
    }
}

impl fmt::Display for EptbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EptbType {
    type Err = EptbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EptbType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EptbError::UnknownVariant {
                kind: "EPTB type",
                value: wanted.to_string(),
            })
    }
}

/// Clinical severity as assessed at classification.
///
/// Collected for forward compatibility; no rule consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ClinicalSeverity {
    Mild,
    #[default]
    Moderate,
    Severe,
    #[serde(rename = "Life-threatening")]
    LifeThreatening,
}

impl fmt::Display for ClinicalSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClinicalSeverity::Mild => write!(f, "Mild"),
            ClinicalSeverity::Moderate => write!(f, "Moderate"),
            ClinicalSeverity::Severe => write!(f, "Severe"),
            ClinicalSeverity::LifeThreatening => write!(f, "Life-threatening"),
        }
    }
}

/// Site and severity of the patient's EPTB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EptbClassification {
    pub eptb_type: EptbType,
    pub severity: ClinicalSeverity,
}

impl EptbClassification {
    /// Classification with default (Moderate) severity
    pub fn new(eptb_type: EptbType) -> Self {
        EptbClassification { eptb_type, severity: ClinicalSeverity::default() }
    }

    pub fn with_severity(mut self, severity: ClinicalSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Derived from the site alone
    pub fn required_duration_months(&self) -> u32 {
        self.eptb_type.required_duration_months()
    }

    /// WHO guideline note shown when the site is selected
    pub fn guidance(&self) -> &'static str {
        if self.eptb_type.requires_extended_course() {
            "WHO Guideline: This form of EPTB requires extended treatment (9-12 months)."
        } else {
            "WHO Guideline: Standard 6-month regimen (2HRZE / 4HR) is usually sufficient."
        }
    }
}
