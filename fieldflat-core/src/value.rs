//! Leaf Values
//!
//! `Value` is the owned form every leaf takes once it leaves a record. It also
//! carries lists (the input of the sequence flattener) and dynamic records
//! built at runtime, e.g. from JSON.

use crate::record::RecordValue;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::time::Duration;

/// An owned value produced by a traversal or supplied by a caller.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value (`Option::None`, JSON `null`)
    Null,
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
    /// Time span, e.g. a warmup period or a timeout
    Duration(Duration),
    /// Ordered sequence without field names
    List(Vec<Value>),
    /// Dictionary; always a leaf for the record traversals
    Map(IndexMap<String, Value>),
    /// Record built at runtime
    Record(RecordValue),
}

impl Value {
    /// Short name of this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Duration(_) => "duration",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Numeric view of the value, if it has one.
    ///
    /// Durations are reported in seconds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Duration(d) => Some(d.as_secs_f64()),
            _ => None,
        }
    }

    /// String contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

// Key order is significant for maps, as it is for records and mappings.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

/// Strings nested inside containers are quoted so `["a, b"]` stays unambiguous.
fn fmt_element(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "{:?}", s),
        other => write!(f, "{}", other),
    }
}

pub(crate) fn fmt_pairs<'a, I>(pairs: I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    f.write_str("{")?;
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: ", key)?;
        fmt_element(value, f)?;
    }
    f.write_str("}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_element(item, f)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => fmt_pairs(map.iter().map(|(k, v)| (k.as_str(), v)), f),
            Value::Record(record) => fmt_pairs(record.iter(), f),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Duration(d) => serializer.serialize_f64(d.as_secs_f64()),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $conv)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    usize => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<RecordValue> for Value {
    fn from(v: RecordValue) -> Self {
        Value::Record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from("Noop").to_string(), "Noop");
        assert_eq!(Value::from(Duration::from_secs(10)).to_string(), "10s");
        assert_eq!(
            Value::from(Duration::from_millis(200)).to_string(),
            "200ms"
        );
    }

    #[test]
    fn test_display_nested_quotes_strings() {
        let list = Value::List(vec![Value::from(1), Value::from("a, b")]);
        assert_eq!(list.to_string(), r#"[1, "a, b"]"#);

        let mut map = IndexMap::new();
        map.insert("level".to_string(), Value::from("debug"));
        assert_eq!(Value::Map(map).to_string(), r#"{level: "debug"}"#);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from(true).kind(), "bool");
        assert_eq!(Value::List(vec![]).kind(), "list");
        assert_eq!(Value::Record(RecordValue::new()).kind(), "record");
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::from(3u32).as_f64(), Some(3.0));
        assert_eq!(Value::from(Duration::from_millis(1500)).as_f64(), Some(1.5));
        assert_eq!(Value::from("x").as_f64(), None);
    }

    #[test]
    fn test_map_equality_is_order_sensitive() {
        let ab: IndexMap<String, Value> =
            [("a".to_string(), Value::from(1)), ("b".to_string(), Value::from(2))].into();
        let ba: IndexMap<String, Value> =
            [("b".to_string(), Value::from(2)), ("a".to_string(), Value::from(1))].into();
        assert_eq!(Value::Map(ab.clone()), Value::Map(ab.clone()));
        assert_ne!(Value::Map(ab), Value::Map(ba));
        assert_ne!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5)), Value::Int(5));
    }

    #[test]
    fn test_serialize_json() {
        let list = Value::List(vec![
            Value::from(1),
            Value::Null,
            Value::from(Duration::from_millis(250)),
        ]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[1,null,0.25]");
    }
}
