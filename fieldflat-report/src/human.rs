//! Human-Readable Output
//!
//! Terminal-friendly rendering of a results table: one block per experiment
//! with its input and output mappings printed as indented trees.

use crate::table::ResultsTable;
use fieldflat_core::{Entry, Mapping};

/// Format a results table for terminal display
pub fn format_human_output(table: &ResultsTable) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("fieldflat Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    if table.is_empty() {
        output.push_str("No rows.\n");
        return output;
    }

    for (i, row) in table.rows().iter().enumerate() {
        output.push_str(&format!("Row {}\n", i + 1));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str("  input\n");
        write_tree(&mut output, &row.input, 2);
        output.push_str("  output\n");
        write_tree(&mut output, &row.output, 2);
        output.push('\n');
    }

    output.push_str(&format!(
        "{} rows, {} columns\n",
        table.len(),
        table.columns().len()
    ));
    output
}

fn write_tree(output: &mut String, mapping: &Mapping, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, entry) in mapping.iter() {
        match entry {
            Entry::Leaf(value) => output.push_str(&format!("{}{}: {}\n", indent, key, value)),
            Entry::Nested(nested) => {
                output.push_str(&format!("{}{}\n", indent, key));
                write_tree(output, nested, depth + 1);
            }
        }
    }
}
