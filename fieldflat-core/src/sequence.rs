//! Sequence Flattening
//!
//! Flattens nested lists into their leaves. This does not consult the record
//! capability: only `Value::List` is descended into.

use crate::error::FlattenError;
use crate::value::Value;

/// Flatten nested lists depth-first, left to right.
///
/// ```
/// use fieldflat_core::{Value, flatten_sequence};
///
/// let v = |n: i64| Value::from(n);
/// let seq = Value::List(vec![
///     v(1),
///     v(2),
///     Value::List(vec![v(3), Value::List(vec![v(4), v(5)])]),
///     v(6),
/// ]);
/// assert_eq!(flatten_sequence(&seq).unwrap(), (1..=6).map(v).collect::<Vec<_>>());
/// ```
///
/// # Errors
/// [`FlattenError::TypeMismatch`] if `seq` is not a list.
pub fn flatten_sequence(seq: &Value) -> Result<Vec<Value>, FlattenError> {
    match seq {
        Value::List(items) => {
            let mut out = Vec::new();
            flatten_into(items, &mut out);
            Ok(out)
        }
        other => Err(FlattenError::type_mismatch("list", other.kind())),
    }
}

fn flatten_into(items: &[Value], out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::List(nested) => flatten_into(nested, out),
            leaf => out.push(leaf.clone()),
        }
    }
}
