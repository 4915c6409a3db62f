//! Record Capability
//!
//! A type takes part in the traversals by implementing [`Node`]. Only types that
//! explicitly return `Some` from [`Node::as_record`] are descended into; every
//! other node is a leaf. Structs normally get both impls from
//! `#[derive(Record)]`.

use crate::value::{Value, fmt_pairs};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Anything that can appear as a field value.
pub trait Node {
    /// Record capability: `Some` if this node is a record whose fields should
    /// be traversed, `None` if it is a leaf.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Owned copy of this node.
    fn to_value(&self) -> Value;
}

/// An ordered collection of named fields.
pub trait Record {
    /// Fields in declaration order. Names must be unique within the record.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A single named field borrowed from a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    value: &'a dyn Node,
    opaque: bool,
}

impl<'a> Field<'a> {
    /// A field whose value is descended into when it is a record.
    pub fn new(name: &'a str, value: &'a dyn Node) -> Self {
        Self {
            name,
            value,
            opaque: false,
        }
    }

    /// A field that is always a leaf, even when its value is a record.
    pub fn leaf(name: &'a str, value: &'a dyn Node) -> Self {
        Self {
            name,
            value,
            opaque: true,
        }
    }

    /// Field name
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Borrowed field value
    pub fn value(&self) -> &'a dyn Node {
        self.value
    }

    /// Whether the field was tagged as a leaf
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Owned leaf value of this field.
    ///
    /// An opaque record-valued field becomes a [`Value::Map`] so it stays a
    /// leaf if the result is traversed again.
    pub fn to_value(&self) -> Value {
        match self.value.to_value() {
            Value::Record(record) if self.opaque => Value::Map(record.into_map()),
            value => value,
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value.to_value())
            .field("opaque", &self.opaque)
            .finish()
    }
}

/// A record assembled at runtime, with fields kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecordValue {
    fields: IndexMap<String, Value>,
}

impl RecordValue {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RecordValue::insert`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field. An existing field keeps its position and has its value
    /// replaced; the previous value is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Discard the record tag, keeping the fields as a dictionary.
    pub fn into_map(self) -> IndexMap<String, Value> {
        self.fields
    }

    /// Snapshot any record into an owned `RecordValue`.
    pub fn from_record(record: &dyn Record) -> Self {
        let mut out = RecordValue::new();
        for field in record.fields() {
            let value = match crate::predicate::record_of(&field) {
                Some(nested) => Value::Record(RecordValue::from_record(nested)),
                None => field.to_value(),
            };
            out.insert(field.name(), value);
        }
        out
    }
}

// Field order is part of a record's identity.
impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RecordValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = RecordValue::new();
        for (name, value) in iter {
            out.insert(name, value);
        }
        out
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pairs(self.iter(), f)
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Record for RecordValue {
    fn fields(&self) -> Vec<Field<'_>> {
        self.fields
            .iter()
            .map(|(name, value)| Field::new(name, value))
            .collect()
    }
}

impl Node for RecordValue {
    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }

    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Node for Value {
    fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}
