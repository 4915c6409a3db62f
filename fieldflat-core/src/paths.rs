//! Path and Value Flattening
//!
//! Depth-first, left-to-right walks over a record that emit one item per leaf
//! field: its dotted path, or its value. Both walks visit leaves in the same
//! order, so `flatten_values(r)[i]` is the value at `flatten_paths(r)[i]`.

use crate::error::FlattenError;
use crate::predicate::{expect_record, record_of};
use crate::record::{Node, Record};
use crate::value::Value;

/// Separator placed between field names in a path.
pub const PATH_SEPARATOR: &str = ".";

/// Dotted path of every leaf field of `node`.
///
/// ```
/// use fieldflat_core::{RecordValue, flatten_paths};
///
/// let a1 = RecordValue::new().with_field("x", 1).with_field("y", 2);
/// let t = RecordValue::new().with_field("z", 0).with_field("a1", a1);
/// assert_eq!(flatten_paths(&t).unwrap(), vec!["z", "a1.x", "a1.y"]);
/// ```
///
/// # Errors
/// [`FlattenError::TypeMismatch`] if `node` is not a record.
pub fn flatten_paths<N: Node + ?Sized>(node: &N) -> Result<Vec<String>, FlattenError> {
    flatten_paths_with_separator(node, PATH_SEPARATOR)
}

/// [`flatten_paths`] joining segments with `separator` instead of `.`.
pub fn flatten_paths_with_separator<N: Node + ?Sized>(
    node: &N,
    separator: &str,
) -> Result<Vec<String>, FlattenError> {
    let record = expect_record(node)?;
    let mut paths = Vec::new();
    collect_paths(record, &mut Vec::new(), separator, &mut paths);
    Ok(paths)
}

fn collect_paths<'a>(
    record: &'a dyn Record,
    prefix: &mut Vec<&'a str>,
    separator: &str,
    out: &mut Vec<String>,
) {
    for field in record.fields() {
        prefix.push(field.name());
        match record_of(&field) {
            Some(nested) => collect_paths(nested, prefix, separator, out),
            None => out.push(prefix.join(separator)),
        }
        prefix.pop();
    }
}

/// Value of every leaf field of `node`, in path order.
///
/// # Errors
/// [`FlattenError::TypeMismatch`] if `node` is not a record.
pub fn flatten_values<N: Node + ?Sized>(node: &N) -> Result<Vec<Value>, FlattenError> {
    let record = expect_record(node)?;
    let mut values = Vec::new();
    collect_values(record, &mut values);
    Ok(values)
}

fn collect_values(record: &dyn Record, out: &mut Vec<Value>) {
    for field in record.fields() {
        match record_of(&field) {
            Some(nested) => collect_values(nested, out),
            None => out.push(field.to_value()),
        }
    }
}
