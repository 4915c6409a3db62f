#![warn(missing_docs)]
//! # fieldflat
//!
//! Flatten nested benchmark parameter and result records for reporting.
//!
//! fieldflat turns statically-shaped experiment configurations and measured
//! outputs into the two forms a benchmark harness prints:
//! - **Column paths**: one dotted path per leaf field (`leader_options.stutter`)
//! - **Nested mappings**: an ordered key/value tree mirroring the record
//!
//! plus a flattener for arbitrarily nested lists and a results table that
//! writes CSV, JSON or terminal output.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fieldflat::prelude::*;
//!
//! #[derive(Record)]
//! struct A { x: i64, y: i64 }
//!
//! #[derive(Record)]
//! struct B { z: i64, a1: A, a2: A }
//!
//! let t = B { z: 0, a1: A { x: 1, y: 2 }, a2: A { x: 3, y: 4 } };
//! assert_eq!(flatten_paths(&t)?, ["z", "a1.x", "a1.y", "a2.x", "a2.y"]);
//! assert_eq!(to_mapping(&t)?.to_string(), "{z: 0, a1: {x: 1, y: 2}, a2: {x: 3, y: 4}}");
//! ```
//!
//! ## Opting Out
//!
//! ```ignore
//! #[derive(Record)]
//! struct Input {
//!     #[record(leaf)]          // printed as one column
//!     workload: StringWorkload,
//!     #[record(rename = "n")]  // column is `n`
//!     num_replicas: u32,
//!     #[record(skip)]          // not reported
//!     scratch: Vec<u8>,
//! }
//! ```

// Re-export core types
pub use fieldflat_core::{
    Entry, Field, FlattenError, IndexMap, Mapping, Node, PATH_SEPARATOR, Record, RecordValue,
    Value, flatten_paths, flatten_paths_with_separator, flatten_sequence, flatten_values,
    to_mapping,
};

// Re-export the derive (macro namespace, alongside the `Record` trait)
pub use fieldflat_macros::Record;

// Re-export reporting
pub use fieldflat_report::{
    OutputFormat, Report, ReportError, ReportMeta, ResultsTable, Row, Summary,
    format_human_output, generate_csv_report, generate_json_report, render,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Entry, Mapping, Node, Record, RecordValue, ResultsTable, Summary, Value, flatten_paths,
        flatten_sequence, flatten_values, to_mapping,
    };
}

/// Run the fieldflat CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     fieldflat::run()
/// }
/// ```
pub use fieldflat_cli::run;
