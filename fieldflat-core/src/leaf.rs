//! `Node` impls for standard types.
//!
//! All of these are leaves except `Option`, `Box` and references, which
//! forward the capability of what they hold.

use crate::record::{Node, Record};
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::time::Duration;

macro_rules! impl_scalar_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_scalar_leaf!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Duration,
);

impl Node for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Node for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl<T: Node> Node for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Node::to_value).collect())
    }
}

impl<T: Node> Node for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: Node> Node for IndexMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: Node> Node for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|v| v.as_record())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Node + ?Sized> Node for &T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
