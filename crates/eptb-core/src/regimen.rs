//! Prescribed anti-TB drug regimen

use crate::config::GuidelineConfig;
use crate::patient::check_range;
use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Intake bounds for the intensive phase (months)
pub const INTENSIVE_MONTHS_RANGE: (u32, u32) = (1, 12);
/// Intake bounds for the continuation phase (months)
pub const CONTINUATION_MONTHS_RANGE: (u32, u32) = (1, 24);

/// Anti-TB drug, ordered H, R, Z, E, S
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Drug {
    #[serde(alias = "H", alias = "Isoniazid (H)")]
    Isoniazid,
    #[serde(alias = "R", alias = "Rifampicin (R)")]
    Rifampicin,
    #[serde(alias = "Z", alias = "Pyrazinamide (Z)")]
    Pyrazinamide,
    #[serde(alias = "E", alias = "Ethambutol (E)")]
    Ethambutol,
    #[serde(alias = "S", alias = "Streptomycin (S)")]
    Streptomycin,
}

impl Drug {
    pub const ALL: [Drug; 5] = [
        Drug::Isoniazid,
        Drug::Rifampicin,
        Drug::Pyrazinamide,
        Drug::Ethambutol,
        Drug::Streptomycin,
    ];

    /// Standard one-letter abbreviation
    pub fn code(&self) -> char {
        match self {
            Drug::Isoniazid => 'H',
            Drug::Rifampicin => 'R',
            Drug::Pyrazinamide => 'Z',
            Drug::Ethambutol => 'E',
            Drug::Streptomycin => 'S',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Drug::Isoniazid => "Isoniazid",
            Drug::Rifampicin => "Rifampicin",
            Drug::Pyrazinamide => "Pyrazinamide",
            Drug::Ethambutol => "Ethambutol",
            Drug::Streptomycin => "Streptomycin",
        }
    }

    fn dose_field(&self) -> &'static str {
        match self {
            Drug::Isoniazid => "dose_H",
            Drug::Rifampicin => "dose_R",
            Drug::Pyrazinamide => "dose_Z",
            Drug::Ethambutol => "dose_E",
            Drug::Streptomycin => "dose_S",
        }
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl FromStr for Drug {
    type Err = EptbError;

    /// Accepts "R", "Rifampicin" or "Rifampicin (R)", case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Drug::ALL
            .iter()
            .copied()
            .find(|d| {
                wanted.eq_ignore_ascii_case(d.name())
                    || wanted.eq_ignore_ascii_case(&d.code().to_string())
                    || wanted.eq_ignore_ascii_case(&d.to_string())
            })
            .ok_or_else(|| EptbError::UnknownVariant {
                kind: "drug",
                value: wanted.to_string(),
            })
    }
}

/// Two-phase regimen with daily doses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimenPlan {
    pub intensive_phase_drugs: BTreeSet<Drug>,
    pub intensive_phase_months: u32,
    pub continuation_phase_drugs: BTreeSet<Drug>,
    pub continuation_phase_months: u32,
    /// Total daily dose per drug in mg; absent drugs read as 0
    pub daily_doses_mg: BTreeMap<Drug, f64>,
}

impl Default for RegimenPlan {
    fn default() -> Self {
        RegimenPlan::standard(60.0)
    }
}

impl RegimenPlan {
    /// Standard 2HRZE / 4HR regimen with weight-banded default doses
    pub fn standard(weight_kg: f64) -> Self {
        Self::standard_with(weight_kg, &GuidelineConfig::default())
    }

    /// Standard regimen whose Rifampicin dose follows the configured weight band
    pub fn standard_with(weight_kg: f64, config: &GuidelineConfig) -> Self {
        let rifampicin = if weight_kg > config.rifampicin_weight_band_kg {
            config.rifampicin_standard_dose_mg
        } else {
            config.rifampicin_low_band_dose_mg
        };
        RegimenPlan {
            intensive_phase_drugs: [Drug::Isoniazid, Drug::Rifampicin, Drug::Pyrazinamide, Drug::Ethambutol]
                .into_iter()
                .collect(),
            intensive_phase_months: 2,
            continuation_phase_drugs: [Drug::Isoniazid, Drug::Rifampicin].into_iter().collect(),
            continuation_phase_months: 4,
            daily_doses_mg: [
                (Drug::Isoniazid, 300.0),
                (Drug::Rifampicin, rifampicin),
                (Drug::Pyrazinamide, 1500.0),
                (Drug::Ethambutol, 1200.0),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Replace both phase lengths (months)
    pub fn with_durations(mut self, intensive_months: u32, continuation_months: u32) -> Self {
        self.intensive_phase_months = intensive_months;
        self.continuation_phase_months = continuation_months;
        self
    }

    /// Set the daily dose for one drug
    pub fn with_dose(mut self, drug: Drug, dose_mg: f64) -> Self {
        self.daily_doses_mg.insert(drug, dose_mg);
        self
    }

    /// Daily dose in mg, 0 when not prescribed
    pub fn dose_mg(&self, drug: Drug) -> f64 {
        self.daily_doses_mg.get(&drug).copied().unwrap_or(0.0)
    }

    pub fn total_months(&self) -> u32 {
        self.intensive_phase_months.saturating_add(self.continuation_phase_months)
    }

    /// Compact notation, e.g. "2HRZE/4HR"
    pub fn notation(&self) -> String {
        let codes = |drugs: &BTreeSet<Drug>| drugs.iter().map(Drug::code).collect::<String>();
        format!(
            "{}{}/{}{}",
            self.intensive_phase_months,
            codes(&self.intensive_phase_drugs),
            self.continuation_phase_months,
            codes(&self.continuation_phase_drugs),
        )
    }

    /// Intake-time bounds check; the evaluation core does not call this
    pub fn validate(&self) -> Result<(), EptbError> {
        let (ip_min, ip_max) = INTENSIVE_MONTHS_RANGE;
        let (cp_min, cp_max) = CONTINUATION_MONTHS_RANGE;
        check_range("intensive_phase_months", self.intensive_phase_months as f64, (ip_min as f64, ip_max as f64))?;
        check_range(
            "continuation_phase_months",
            self.continuation_phase_months as f64,
            (cp_min as f64, cp_max as f64),
        )?;
        for (drug, dose) in &self.daily_doses_mg {
            check_range(drug.dose_field(), *dose, (0.0, f64::MAX))?;
        }
        Ok(())
    }
}
