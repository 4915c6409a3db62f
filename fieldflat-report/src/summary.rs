//! Summary Digests
//!
//! A one-line digest of selected leaves, e.g.
//! `{f: 1, num_client_procs: 4, latency.median_ms: 1.23457}`.

use crate::error::ReportError;
use crate::table::Row;
use fieldflat_core::{Entry, Mapping, Value};

/// Significant digits used for floats unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 6;

/// A selection of dotted paths to print for each experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    fields: Vec<String>,
    precision: usize,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Summary {
    /// Empty selection with the default precision
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to the selection
    pub fn field(mut self, path: impl Into<String>) -> Self {
        self.fields.push(path.into());
        self
    }

    /// Add several paths to the selection
    pub fn fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Significant digits for floats (clamped to at least 1)
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = digits.max(1);
        self
    }

    /// Selected paths
    pub fn selected(&self) -> &[String] {
        &self.fields
    }

    /// Render the selection from a single mapping.
    pub fn render(&self, mapping: &Mapping) -> Result<String, ReportError> {
        self.render_with(|path| {
            leaf(mapping, path).ok_or_else(|| ReportError::MissingPath(path.to_string()))
        })
    }

    /// Render the selection from a table row. Each path must name a leaf of
    /// exactly one of the row's input and output.
    pub fn render_row(&self, row: &Row) -> Result<String, ReportError> {
        self.render_with(|path| match (leaf(&row.input, path), leaf(&row.output, path)) {
            (Some(_), Some(_)) => Err(ReportError::AmbiguousPath(path.to_string())),
            (Some(value), None) | (None, Some(value)) => Ok(value),
            (None, None) => Err(ReportError::MissingPath(path.to_string())),
        })
    }

    fn render_with<'a>(
        &self,
        lookup: impl Fn(&str) -> Result<&'a Value, ReportError>,
    ) -> Result<String, ReportError> {
        let mut parts = Vec::with_capacity(self.fields.len());
        for path in &self.fields {
            let value = lookup(path)?;
            parts.push(format!("{}: {}", path, self.format_value(value)));
        }
        Ok(format!("{{{}}}", parts.join(", ")))
    }

    fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Float(v) => format_significant(*v, self.precision),
            Value::Str(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

fn leaf<'a>(mapping: &'a Mapping, path: &str) -> Option<&'a Value> {
    mapping.get_path(path).and_then(Entry::as_leaf)
}

/// Format `value` with `digits` significant digits, dropping trailing zeros.
///
/// Very large or very small magnitudes switch to exponent notation.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    // Exponent of the rounded value, so 999999.7 at six digits is 1e6.
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exp.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        format!("{}e{}", trim_fraction(mantissa), exponent)
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
