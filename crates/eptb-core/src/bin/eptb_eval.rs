//! EPTB Regimen Evaluation CLI
//!
//! Evaluate a prescribed regimen, render a clinical report, or summarize a
//! cohort file.
//!
//! Usage:
//!   eptb-eval evaluate <case.json> [--config <thresholds.json>]
//!   eptb-eval report <case.json> [--output <file>]
//!   eptb-eval cohort <data.csv>
//!   eptb-eval template

use clap::{Parser, Subcommand, ValueEnum};
use eptb_core::report::{self, ReportInput};
use eptb_core::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eptb-eval")]
#[command(author = "EPTB Decision Support")]
#[command(version = "0.1.0")]
#[command(about = "Evaluate extrapulmonary TB regimens against WHO guideline thresholds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Guideline threshold overrides (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a patient case and list findings
    Evaluate {
        /// Case document (JSON with patient, classification, regimen)
        case: PathBuf,
    },

    /// Generate the clinical decision report for a case
    Report {
        /// Case document
        case: PathBuf,
    },

    /// Descriptive statistics for a cohort CSV (Age, Weight, EPTB_Type, Outcome)
    Cohort {
        /// CSV file
        file: PathBuf,
    },

    /// Print a default case document to start from
    Template,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let evaluator = match &cli.config {
        Some(path) => Evaluator::new(GuidelineConfig::from_path(path)?),
        None => Evaluator::default(),
    };

    let (output_str, default_file) = match &cli.command {
        Commands::Evaluate { case } => (evaluate_case(case, &evaluator, cli.format)?, None),
        Commands::Report { case } => {
            let (text, file_name) = render_report(case, &evaluator, cli.format)?;
            (text, Some(file_name))
        }
        Commands::Cohort { file } => (summarize_cohort(file, cli.format)?, None),
        Commands::Template => (PatientCase::default().to_json_pretty()?, None),
    };

    if let Some(output_path) = cli.output.or(default_file.map(PathBuf::from)) {
        fs::write(&output_path, &output_str)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn evaluate_case(path: &Path, evaluator: &Evaluator, format: OutputFormat) -> Result<String, EptbError> {
    let case = PatientCase::from_path(path)?;
    log::info!("evaluating case {}", case.patient.display_name());
    let result = case.evaluate_with(evaluator);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            let mut lines = vec![
                format!("Patient: {} ({})", case.patient.display_name(), case.classification.eptb_type),
                format!("BMI: {:.2} kg/m2 | eGFR: {:.1} mL/min", result.metrics.bmi, result.metrics.egfr_ml_min),
                case.classification.guidance().to_string(),
                String::new(),
            ];
            for finding in &result.findings {
                lines.push(format!(
                    "[{:<7}] {:<17} {}",
                    finding.severity.to_string(),
                    format!("{:?}", finding.category),
                    finding.message
                ));
                if let Some(rec) = &finding.recommendation {
                    lines.push(format!("{:27} -> {}", "", rec));
                }
            }
            lines.push(String::new());
            lines.push(format!("Status: {}", result.status()));
            Ok(lines.join("\n"))
        }
    }
}

fn render_report(path: &Path, evaluator: &Evaluator, format: OutputFormat) -> Result<(String, String), EptbError> {
    let case = PatientCase::from_path(path)?;
    let regimen = case.regimen_with(evaluator.config());
    let result = evaluator.evaluate(&case.patient, &case.classification, &regimen);
    let input = ReportInput {
        patient: &case.patient,
        classification: &case.classification,
        regimen: &regimen,
        result: &result,
    };
    let today = chrono::Local::now().date_naive();

    match format {
        OutputFormat::Json => {
            let file_name = report::report_file_name(&case.patient).replace(".txt", ".json");
            Ok((report::render_json(input, today)?, file_name))
        }
        OutputFormat::Text => Ok((report::render_text(input, today), report::report_file_name(&case.patient))),
    }
}

fn summarize_cohort(path: &Path, format: OutputFormat) -> Result<String, EptbError> {
    let summary = CohortSummary::from_reader(File::open(path)?)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            let mut lines = vec![
                format!("Patients: {}", summary.patients),
                format!("Mean age: {:.1} | Mean weight: {:.1} kg", summary.mean_age, summary.mean_weight_kg),
                String::new(),
                "EPTB Types Distribution".to_string(),
            ];
            for (eptb_type, count) in &summary.type_distribution {
                lines.push(format!(
                    "  {:<20} {:>5}  ({:.1}%)",
                    eptb_type,
                    count,
                    summary.type_share(eptb_type) * 100.0
                ));
            }
            if let Some(outcomes) = &summary.outcomes_by_type {
                lines.push(String::new());
                lines.push("Outcomes by Type".to_string());
                for (eptb_type, counts) in outcomes {
                    let counts: Vec<String> = counts.iter().map(|(o, n)| format!("{}={}", o, n)).collect();
                    lines.push(format!("  {:<20} {}", eptb_type, counts.join(", ")));
                }
            }
            Ok(lines.join("\n"))
        }
    }
}
