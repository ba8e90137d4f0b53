//! Patient demographics and laboratory values
//!
//! A [`PatientRecord`] is produced by intake and handed to the evaluation
//! core as an immutable value.

use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted age range in whole years
pub const AGE_RANGE: (u32, u32) = (0, 120);
/// Accepted body weight range (kg)
pub const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 200.0);
/// Accepted height range (cm)
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 250.0);
/// Accepted serum creatinine range (mg/dL)
pub const CREATININE_RANGE_MG_DL: (f64, f64) = (0.1, 20.0);

/// Biological sex, used for the Cockcroft-Gault correction factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// HIV serostatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HivStatus {
    #[default]
    Negative,
    Positive,
}

impl HivStatus {
    pub fn is_positive(&self) -> bool {
        matches!(self, HivStatus::Positive)
    }
}

impl fmt::Display for HivStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HivStatus::Negative => write!(f, "Negative"),
            HivStatus::Positive => write!(f, "Positive"),
        }
    }
}

/// Patient intake record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRecord {
    /// Optional patient identifier or name
    pub name: Option<String>,
    /// Age in whole years (0-120)
    pub age: u32,
    pub sex: Sex,
    /// Body weight in kg (1-200), crucial for dosing
    pub weight_kg: f64,
    /// Height in cm (50-250)
    pub height_cm: f64,
    /// Serum creatinine in mg/dL (0.1-20)
    pub serum_creatinine_mg_dl: f64,
    pub hiv_status: HivStatus,
    /// History of liver disease or hepatitis. Collected but not consulted
    /// by any rule.
    pub liver_disease: bool,
}

impl Default for PatientRecord {
    fn default() -> Self {
        PatientRecord {
            name: None,
            age: 25,
            sex: Sex::Male,
            weight_kg: 60.0,
            height_cm: 170.0,
            serum_creatinine_mg_dl: 0.9,
            hiv_status: HivStatus::Negative,
            liver_disease: false,
        }
    }
}

impl PatientRecord {
    /// Label used in report headers and file names
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => "Patient",
        }
    }

    /// Check every numeric field against its intake range.
    ///
    /// The evaluation core never calls this; intake must reject
    /// out-of-range input before evaluation.
    pub fn validate(&self) -> Result<(), EptbError> {
        check_range("age", self.age as f64, (AGE_RANGE.0 as f64, AGE_RANGE.1 as f64))?;
        check_range("weight_kg", self.weight_kg, WEIGHT_RANGE_KG)?;
        check_range("height_cm", self.height_cm, HEIGHT_RANGE_CM)?;
        check_range("serum_creatinine_mg_dl", self.serum_creatinine_mg_dl, CREATININE_RANGE_MG_DL)?;
        Ok(())
    }
}

/// Inclusive range check shared by intake validators. NaN is rejected.
pub(crate) fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), EptbError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(EptbError::InvalidInputRange { field, value, min, max })
    }
}
