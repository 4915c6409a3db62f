//! Record to Mapping Conversion

use crate::error::FlattenError;
use crate::mapping::{Entry, Mapping};
use crate::predicate::{expect_record, record_of};
use crate::record::{Node, Record};

/// Convert a record into a nested [`Mapping`] with the same field order.
///
/// Record-valued fields become nested mappings; every other field is stored by
/// value. `to_mapping(r)?.leaf_paths()` equals `flatten_paths(r)?`.
///
/// # Errors
/// [`FlattenError::TypeMismatch`] if `node` is not a record.
pub fn to_mapping<N: Node + ?Sized>(node: &N) -> Result<Mapping, FlattenError> {
    Ok(record_to_mapping(expect_record(node)?))
}

fn record_to_mapping(record: &dyn Record) -> Mapping {
    let mut mapping = Mapping::new();
    for field in record.fields() {
        let entry = match record_of(&field) {
            Some(nested) => Entry::Nested(record_to_mapping(nested)),
            None => Entry::Leaf(field.to_value()),
        };
        mapping.insert(field.name(), entry);
    }
    mapping
}
