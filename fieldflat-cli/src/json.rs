//! JSON input conversion
//!
//! Objects become records, arrays become lists. Tagging happens here, at the
//! boundary, so the flatteners never guess whether a map is a record.

use anyhow::Context;
use fieldflat_core::{RecordValue, Value};
use std::path::Path;

/// Convert a parsed JSON document into a [`Value`].
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(from_json).collect()),
        serde_json::Value::Object(fields) => Value::Record(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), from_json(value)))
                .collect::<RecordValue>(),
        ),
    }
}

/// Read and convert a JSON file.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(from_json(&json))
}

/// One experiment of a `table` input file.
#[derive(Debug)]
pub struct Experiment {
    /// Parameters
    pub input: Value,
    /// Measurements
    pub output: Value,
}

/// Split a JSON array of `{"input": ..., "output": ...}` objects.
pub fn experiments(value: &Value) -> anyhow::Result<Vec<Experiment>> {
    let items = value
        .as_list()
        .ok_or_else(|| anyhow::anyhow!("Expected a JSON array of experiments, found {}", value.kind()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let Value::Record(record) = item else {
                anyhow::bail!("Experiment {} is a {}, expected an object", i, item.kind());
            };
            let input = record
                .get("input")
                .with_context(|| format!("Experiment {} has no `input`", i))?;
            let output = record
                .get("output")
                .with_context(|| format!("Experiment {} has no `output`", i))?;
            Ok(Experiment {
                input: input.clone(),
                output: output.clone(),
            })
        })
        .collect()
}
