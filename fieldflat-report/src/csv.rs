//! CSV Output

use crate::error::ReportError;
use crate::table::ResultsTable;

/// Generate a CSV report: the header row, then one row per experiment.
///
/// Cells use each value's `Display` form, so durations read `10s` and lists
/// read `[1, 2]`.
pub fn generate_csv_report(table: &ResultsTable) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if !table.columns().is_empty() {
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.values.iter().map(|v| v.to_string()))?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldflat_core::{RecordValue, Value};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_csv_report() {
        let input = RecordValue::new()
            .with_field("f", 1)
            .with_field("warmup", Duration::from_secs(10))
            .with_field("state_machine", "Key, Value");
        let output = RecordValue::new().with_field(
            "latency",
            RecordValue::new().with_field("median_ms", 1.5),
        );

        let mut table = ResultsTable::new();
        table.push(&input, &output).unwrap();
        table
            .push(&input.clone().with_field("f", 2), &output)
            .unwrap();

        assert_eq!(
            generate_csv_report(&table).unwrap(),
            "f,warmup,state_machine,latency.median_ms\n\
             1,10s,\"Key, Value\",1.5\n\
             2,10s,\"Key, Value\",1.5\n"
        );
    }

    #[test]
    fn test_lists_are_single_cells() {
        let input = RecordValue::new().with_field("sizes", vec![Value::from(1), Value::from(2)]);
        let mut table = ResultsTable::new();
        table.push(&input, &RecordValue::new()).unwrap();
        assert_eq!(generate_csv_report(&table).unwrap(), "sizes\n\"[1, 2]\"\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(generate_csv_report(&ResultsTable::new()).unwrap(), "");
    }
}
