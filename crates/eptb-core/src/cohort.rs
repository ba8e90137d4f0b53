//! Cohort CSV reader and descriptive statistics
//!
//! Reads independent patient rows (`Age`, `Weight`, `EPTB_Type` and an
//! optional `Outcome`) and aggregates them for charting. This path never
//! calls the evaluation engine; a malformed file is an error local to it.

use crate::EptbError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

/// A single cohort row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub age: f64,
    pub weight_kg: f64,
    pub eptb_type: String,
    /// e.g. "Success" or "Fail"; `None` when the column is absent or blank
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    age: usize,
    weight: usize,
    eptb_type: usize,
    outcome: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, EptbError> {
        let find = |name: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let require = |name: &str| find(name).ok_or_else(|| EptbError::MissingColumn(name.to_string()));

        Ok(Columns {
            age: require("Age")?,
            weight: require("Weight")?,
            eptb_type: require("EPTB_Type")?,
            outcome: find("Outcome"),
        })
    }
}

/// Split one CSV line, honouring double-quoted fields and `""` escapes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Cohort CSV parser
pub struct CohortReader<R: Read> {
    reader: BufReader<R>,
    columns: Columns,
    has_outcome: bool,
    line_number: usize,
}

impl<R: Read> CohortReader<R> {
    /// Create a reader, consuming the header line
    pub fn new(reader: R) -> Result<Self, EptbError> {
        let mut buf_reader = BufReader::new(reader);
        let mut line = String::new();
        let mut line_number = 0;

        // Skip leading blank lines; a file without a header has no rows either
        loop {
            line.clear();
            let bytes_read = buf_reader.read_line(&mut line)?;
            if bytes_read == 0 {
                return Err(EptbError::EmptyCohort);
            }
            line_number += 1;
            if !line.trim().is_empty() {
                break;
            }
        }

        let header = split_csv_line(line.trim_end_matches(['\r', '\n']).trim_start_matches('\u{feff}'));
        let columns = Columns::from_header(&header)?;

        Ok(CohortReader {
            reader: buf_reader,
            has_outcome: columns.outcome.is_some(),
            columns,
            line_number,
        })
    }

    /// Whether the file carries an Outcome column
    pub fn has_outcome(&self) -> bool {
        self.has_outcome
    }

    /// Read all remaining rows
    pub fn read_rows(&mut self) -> Result<Vec<CohortRow>, EptbError> {
        let mut rows = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                break;
            }
            self.line_number += 1;

            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() {
                continue;
            }
            rows.push(self.parse_row(trimmed)?);
        }

        log::debug!("read {} cohort rows", rows.len());
        Ok(rows)
    }

    fn parse_row(&self, line: &str) -> Result<CohortRow, EptbError> {
        let fields = split_csv_line(line);
        let field = |index: usize, name: &str| {
            fields.get(index).map(|f| f.trim()).ok_or_else(|| EptbError::MalformedCohort {
                line: self.line_number,
                reason: format!("missing {} field", name),
            })
        };
        let number = |index: usize, name: &str| -> Result<f64, EptbError> {
            let raw = field(index, name)?;
            let value = raw.parse::<f64>().map_err(|_| EptbError::MalformedCohort {
                line: self.line_number,
                reason: format!("{} is not a number: '{}'", name, raw),
            })?;
            if !value.is_finite() {
                return Err(EptbError::MalformedCohort {
                    line: self.line_number,
                    reason: format!("{} is not a finite number: '{}'", name, raw),
                });
            }
            Ok(value)
        };

        let eptb_type = field(self.columns.eptb_type, "EPTB_Type")?;
        if eptb_type.is_empty() {
            return Err(EptbError::MalformedCohort {
                line: self.line_number,
                reason: "empty EPTB_Type".to_string(),
            });
        }

        let outcome = self
            .columns
            .outcome
            .and_then(|index| fields.get(index))
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string);

        Ok(CohortRow {
            age: number(self.columns.age, "Age")?,
            weight_kg: number(self.columns.weight, "Weight")?,
            eptb_type: eptb_type.to_string(),
            outcome,
        })
    }
}

/// Aggregate numbers behind the cohort charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub patients: usize,
    pub mean_age: f64,
    pub mean_weight_kg: f64,
    /// Patients per EPTB type
    pub type_distribution: BTreeMap<String, usize>,
    /// Outcome counts per EPTB type; `None` without an Outcome column
    pub outcomes_by_type: Option<BTreeMap<String, BTreeMap<String, usize>>>,
}

impl CohortSummary {
    /// Summarize parsed rows
    pub fn from_rows(rows: &[CohortRow], with_outcomes: bool) -> Result<Self, EptbError> {
        if rows.is_empty() {
            return Err(EptbError::EmptyCohort);
        }

        let n = rows.len() as f64;
        let mean_age = rows.iter().map(|r| r.age).sum::<f64>() / n;
        let mean_weight_kg = rows.iter().map(|r| r.weight_kg).sum::<f64>() / n;

        let mut type_distribution = BTreeMap::new();
        for row in rows {
            *type_distribution.entry(row.eptb_type.clone()).or_insert(0) += 1;
        }

        let outcomes_by_type = with_outcomes.then(|| {
            let mut outcomes: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
            for row in rows {
                if let Some(outcome) = &row.outcome {
                    *outcomes
                        .entry(row.eptb_type.clone())
                        .or_default()
                        .entry(outcome.clone())
                        .or_insert(0) += 1;
                }
            }
            outcomes
        });

        Ok(CohortSummary {
            patients: rows.len(),
            mean_age,
            mean_weight_kg,
            type_distribution,
            outcomes_by_type,
        })
    }

    /// Parse a CSV source and summarize it
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EptbError> {
        let mut cohort = CohortReader::new(reader)?;
        let rows = cohort.read_rows()?;
        Self::from_rows(&rows, cohort.has_outcome())
    }

    /// Fraction of the cohort with the given EPTB type
    pub fn type_share(&self, eptb_type: &str) -> f64 {
        let count = self.type_distribution.get(eptb_type).copied().unwrap_or(0);
        count as f64 / self.patients as f64
    }

    /// Fraction of recorded outcomes equal to "Success" for a type
    pub fn success_rate(&self, eptb_type: &str) -> Option<f64> {
        let outcomes = self.outcomes_by_type.as_ref()?.get(eptb_type)?;
        let total: usize = outcomes.values().sum();
        if total == 0 {
            return None;
        }
        let successes: usize = outcomes
            .iter()
            .filter(|(outcome, _)| outcome.eq_ignore_ascii_case("success"))
            .map(|(_, count)| count)
            .sum();
        Some(successes as f64 / total as f64)
    }
}
