//! JSON Output

use crate::table::{ResultsTable, Row};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Layout version
    pub schema_version: u32,
    /// Version of the crate that wrote the report
    pub version: String,
    /// When the report was generated
    pub timestamp: DateTime<Utc>,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn now() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Complete results report, borrowing the table it describes
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Metadata
    pub meta: ReportMeta,
    /// Column headers
    pub columns: &'a [String],
    /// Per-experiment input and output mappings
    pub rows: &'a [Row],
}

impl<'a> Report<'a> {
    /// Build a report for `table` stamped with the current time
    pub fn new(table: &'a ResultsTable) -> Self {
        Self::with_meta(table, ReportMeta::now())
    }

    /// Build a report with explicit metadata
    pub fn with_meta(table: &'a ResultsTable, meta: ReportMeta) -> Self {
        Self {
            meta,
            columns: table.columns(),
            rows: table.rows(),
        }
    }
}

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldflat_core::RecordValue;

    #[test]
    fn test_json_report_layout() {
        let input = RecordValue::new()
            .with_field("f", 1)
            .with_field("options", RecordValue::new().with_field("stutter", 1000));
        let output = RecordValue::new().with_field("throughput", 12.5);

        let mut table = ResultsTable::new();
        table.push(&input, &output).unwrap();

        let json = generate_json_report(&Report::new(&table)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["meta"]["schema_version"], SCHEMA_VERSION);
        assert_eq!(
            parsed["columns"],
            serde_json::json!(["f", "options.stutter", "throughput"])
        );
        assert_eq!(parsed["rows"][0]["input"]["options"]["stutter"], 1000);
        assert_eq!(parsed["rows"][0]["output"]["throughput"], 12.5);
        assert!(parsed["rows"][0].get("values").is_none());
    }

    #[test]
    fn test_selected_table_omits_dropped_leaves() {
        let input = RecordValue::new().with_field("f", 1).with_field("secret", 9);
        let output = RecordValue::new()
            .with_field("latency", RecordValue::new().with_field("median_ms", 1.5));

        let mut table = ResultsTable::new();
        table.push(&input, &output).unwrap();
        let latency = table.select(|c| c.starts_with("latency"));

        let json = generate_json_report(&Report::new(&latency)).unwrap();
        assert!(!json.contains("secret"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["columns"], serde_json::json!(["latency.median_ms"]));
        assert_eq!(parsed["rows"][0]["input"], serde_json::json!({}));
        assert_eq!(parsed["rows"][0]["output"]["latency"]["median_ms"], 1.5);
    }
}
