//! Guideline thresholds used by the rule evaluators
//!
//! Defaults follow the WHO EPTB treatment guidance. Overrides can be
//! loaded from a JSON document; any field left out keeps its default.

use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric cut-offs for every rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineConfig {
    /// Minimum total months for meningitis and bone/joint disease
    pub extended_course_min_months: u32,
    /// Minimum total months for all other sites
    pub standard_course_min_months: u32,
    /// Weight (kg) separating the Rifampicin 450 mg and 600 mg bands
    pub rifampicin_weight_band_kg: f64,
    /// Rifampicin dose expected above the weight band
    pub rifampicin_standard_dose_mg: f64,
    /// Usual Rifampicin dose below the weight band
    pub rifampicin_low_band_dose_mg: f64,
    /// Pyrazinamide target dose per kg body weight
    pub pyrazinamide_mg_per_kg: f64,
    /// Lower tolerance as a fraction of the Pyrazinamide target
    pub pyrazinamide_low_factor: f64,
    /// Upper tolerance as a fraction of the Pyrazinamide target
    pub pyrazinamide_high_factor: f64,
    /// eGFR below this is severe impairment (mL/min)
    pub severe_renal_egfr: f64,
    /// eGFR below this is moderate impairment (mL/min)
    pub moderate_renal_egfr: f64,
}

impl Default for GuidelineConfig {
    fn default() -> Self {
        GuidelineConfig {
            extended_course_min_months: 9,
            standard_course_min_months: 6,
            rifampicin_weight_band_kg: 50.0,
            rifampicin_standard_dose_mg: 600.0,
            rifampicin_low_band_dose_mg: 450.0,
            pyrazinamide_mg_per_kg: 25.0,
            pyrazinamide_low_factor: 0.8,
            pyrazinamide_high_factor: 1.2,
            severe_renal_egfr: 30.0,
            moderate_renal_egfr: 60.0,
        }
    }
}

impl GuidelineConfig {
    /// Parse a JSON override document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, EptbError> {
        let config: GuidelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EptbError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("loaded guideline config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject inverted or non-positive bands
    pub fn validate(&self) -> Result<(), EptbError> {
        if self.standard_course_min_months == 0 || self.extended_course_min_months == 0 {
            return Err(EptbError::Config("course minimums must be at least one month".into()));
        }
        if !(self.rifampicin_weight_band_kg > 0.0) || !(self.rifampicin_standard_dose_mg > 0.0) {
            return Err(EptbError::Config("rifampicin band and dose must be positive".into()));
        }
        let low_band = self.rifampicin_low_band_dose_mg;
        if !(low_band > 0.0 && low_band < self.rifampicin_standard_dose_mg) {
            return Err(EptbError::Config(format!(
                "rifampicin low-band dose {} must be positive and below the standard dose {}",
                low_band, self.rifampicin_standard_dose_mg
            )));
        }
        if !(self.pyrazinamide_mg_per_kg > 0.0) {
            return Err(EptbError::Config("pyrazinamide mg/kg must be positive".into()));
        }
        if !(self.pyrazinamide_low_factor < self.pyrazinamide_high_factor) {
            return Err(EptbError::Config(format!(
                "pyrazinamide tolerance inverted: low {} >= high {}",
                self.pyrazinamide_low_factor, self.pyrazinamide_high_factor
            )));
        }
        if !(self.severe_renal_egfr < self.moderate_renal_egfr) {
            return Err(EptbError::Config(format!(
                "renal cut-offs inverted: severe {} >= moderate {}",
                self.severe_renal_egfr, self.moderate_renal_egfr
            )));
        }
        Ok(())
    }
}
