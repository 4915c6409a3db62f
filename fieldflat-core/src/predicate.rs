//! Record Predicate
//!
//! The single place that decides record vs. leaf. The path flattener, value
//! flattener and mapping converter all go through here so they agree on
//! recursion.

use crate::error::FlattenError;
use crate::record::{Field, Node, Record};

/// The record behind a field, or `None` if the field is a leaf.
///
/// Total: opaque fields and nodes without the record capability are leaves.
pub(crate) fn record_of<'a>(field: &Field<'a>) -> Option<&'a dyn Record> {
    if field.is_opaque() {
        return None;
    }
    field.value().as_record()
}

/// Top-level check shared by the record entry points.
pub(crate) fn expect_record<N: Node + ?Sized>(node: &N) -> Result<&dyn Record, FlattenError> {
    node.as_record()
        .ok_or_else(|| FlattenError::type_mismatch("record", node.to_value().kind()))
}
