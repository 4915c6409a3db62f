//! Results Table
//!
//! One row per experiment. The header is the input record's paths followed by
//! the output record's paths and is fixed by the first row pushed.

use crate::error::ReportError;
use fieldflat_core::{Mapping, Node, Value, flatten_paths, flatten_values, to_mapping};
use serde::Serialize;
use std::collections::HashSet;

/// A single experiment: its parameters, its measurements, and the flattened
/// cells in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Experiment parameters as a nested mapping
    pub input: Mapping,
    /// Measured output as a nested mapping
    pub output: Mapping,
    /// Leaf values of input then output, aligned with the table columns
    #[serde(skip)]
    pub values: Vec<Value>,
}

/// Accumulates experiment rows under a shared header.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    /// Full header fixed by the first row; later rows are checked against it
    schema: Vec<String>,
    /// Indices into `schema` kept by [`ResultsTable::select`]
    selection: Option<Vec<usize>>,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an (input, output) pair.
    ///
    /// The first row fixes the header; every later row must flatten to the
    /// same columns. A rejected row leaves the table unchanged. On a selected
    /// table the row is checked against the full header and then narrowed to
    /// the selected columns.
    pub fn push<I, O>(&mut self, input: &I, output: &O) -> Result<(), ReportError>
    where
        I: Node + ?Sized,
        O: Node + ?Sized,
    {
        let mut columns = flatten_paths(input)?;
        columns.extend(flatten_paths(output)?);

        if self.rows.is_empty() {
            check_unique(&columns)?;
            tracing::debug!(columns = columns.len(), "results table header fixed");
        } else if columns != self.schema {
            return Err(ReportError::SchemaMismatch {
                row: self.rows.len(),
                detail: describe_mismatch(&self.schema, &columns),
            });
        }

        let mut values = flatten_values(input)?;
        values.extend(flatten_values(output)?);

        let row = Row {
            input: to_mapping(input)?,
            output: to_mapping(output)?,
            values,
        };

        if self.rows.is_empty() {
            self.schema = columns;
            self.columns = self.schema.clone();
        }
        let row = match &self.selection {
            Some(kept) => narrow(&row, &self.schema, kept),
            None => row,
        };
        self.rows.push(row);
        tracing::debug!(rows = self.rows.len(), "results table row added");
        Ok(())
    }

    /// Column headers
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been pushed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the table restricted to the columns `keep` accepts.
    ///
    /// Cells and row mappings are both narrowed, so every output format shows
    /// the same leaves. Rows pushed later are narrowed the same way. An empty
    /// table has no header to select from and is returned unselected.
    pub fn select(&self, keep: impl Fn(&str) -> bool) -> ResultsTable {
        if self.schema.is_empty() {
            return self.clone();
        }

        let visible: Vec<usize> = match &self.selection {
            Some(kept) => kept.clone(),
            None => (0..self.schema.len()).collect(),
        };
        let positions: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| keep(c))
            .map(|(i, _)| i)
            .collect();
        let kept: Vec<usize> = positions.iter().map(|&p| visible[p]).collect();

        ResultsTable {
            schema: self.schema.clone(),
            columns: kept.iter().map(|&i| self.schema[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| narrow(row, &self.columns, &positions))
                .collect(),
            selection: Some(kept),
        }
    }
}

/// Restrict `row`, whose cells line up with `columns`, to the cells at
/// `positions`. Column names are unique, so leaves are matched by path.
fn narrow(row: &Row, columns: &[String], positions: &[usize]) -> Row {
    let names: HashSet<&str> = positions.iter().map(|&p| columns[p].as_str()).collect();
    Row {
        input: row.input.filter_leaves(|path| names.contains(path)),
        output: row.output.filter_leaves(|path| names.contains(path)),
        values: positions.iter().map(|&p| row.values[p].clone()).collect(),
    }
}

fn check_unique(columns: &[String]) -> Result<(), ReportError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ReportError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}

fn describe_mismatch(expected: &[String], found: &[String]) -> String {
    let position = expected
        .iter()
        .zip(found)
        .position(|(e, f)| e != f)
        .unwrap_or(expected.len().min(found.len()));

    match (expected.get(position), found.get(position)) {
        (Some(e), Some(f)) => format!("column {} is `{}`, expected `{}`", position, f, e),
        (Some(e), None) => format!("missing column `{}`", e),
        (None, Some(f)) => format!("unexpected column `{}`", f),
        (None, None) => "columns differ".to_string(),
    }
}
