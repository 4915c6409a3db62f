#![warn(missing_docs)]
//! fieldflat Report - Tables and Output Formats
//!
//! Builds results tables from flattened records and renders them:
//! - CSV (one column per leaf path)
//! - JSON (metadata plus nested input/output mappings)
//! - Human (indented terminal output)
//! - One-line summary digests of selected paths

mod csv;
mod error;
mod human;
mod json;
mod summary;
mod table;

pub use csv::generate_csv_report;
pub use error::ReportError;
pub use human::format_human_output;
pub use json::{Report, ReportMeta, SCHEMA_VERSION, generate_json_report};
pub use summary::{DEFAULT_PRECISION, Summary, format_significant};
pub use table::{ResultsTable, Row};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// JSON with metadata
    Json,
    /// CSV for spreadsheets and dataframes
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render `table` in the requested format.
pub fn render(table: &ResultsTable, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Human => Ok(format_human_output(table)),
        OutputFormat::Json => Ok(generate_json_report(&Report::new(table))?),
        OutputFormat::Csv => generate_csv_report(table),
    }
}
