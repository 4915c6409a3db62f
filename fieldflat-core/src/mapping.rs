//! Nested Mappings
//!
//! The output of [`crate::to_mapping`]: an ordered map mirroring a record's
//! structure, with leaves held by value.

use crate::paths::PATH_SEPARATOR;
use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A mapping entry: a leaf value or a nested mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Leaf field value
    Leaf(Value),
    /// Record-valued field
    Nested(Mapping),
}

impl Entry {
    /// The leaf value, if this entry is a leaf
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Entry::Leaf(v) => Some(v),
            Entry::Nested(_) => None,
        }
    }

    /// The nested mapping, if this entry is one
    pub fn as_nested(&self) -> Option<&Mapping> {
        match self {
            Entry::Nested(m) => Some(m),
            Entry::Leaf(_) => None,
        }
    }
}

/// Ordered mapping from field name to [`Entry`].
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Entry>,
}

impl Mapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Re-inserting a key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries.insert(key.into(), entry)
    }

    /// Top-level lookup
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Look up an entry by dotted path, e.g. `"latency.median_ms"`.
    pub fn get_path(&self, path: &str) -> Option<&Entry> {
        self.get_path_with_separator(path, PATH_SEPARATOR)
    }

    /// [`Mapping::get_path`] with a custom separator.
    pub fn get_path_with_separator(&self, path: &str, separator: &str) -> Option<&Entry> {
        let mut segments = path.split(separator);
        let mut entry = self.entries.get(segments.next()?)?;
        for segment in segments {
            entry = entry.as_nested()?.entries.get(segment)?;
        }
        Some(entry)
    }

    /// Top-level keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dotted path of every leaf, depth-first in key order.
    pub fn leaf_paths(&self) -> Vec<String> {
        self.leaf_paths_with_separator(PATH_SEPARATOR)
    }

    /// [`Mapping::leaf_paths`] with a custom separator.
    pub fn leaf_paths_with_separator(&self, separator: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.walk_leaves(&mut Vec::new(), &mut |prefix, _| out.push(prefix.join(separator)));
        out
    }

    /// Every leaf value, depth-first in key order.
    pub fn leaf_values(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.walk_leaves(&mut Vec::new(), &mut |_, value| out.push(value));
        out
    }

    /// Number of leaves reachable from this mapping
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                Entry::Leaf(_) => 1,
                Entry::Nested(m) => m.leaf_count(),
            })
            .sum()
    }

    /// Copy holding only the leaves whose dotted path `keep` accepts.
    ///
    /// Nested mappings left without leaves are dropped.
    pub fn filter_leaves(&self, keep: impl Fn(&str) -> bool) -> Mapping {
        self.filter_with(&mut Vec::new(), &keep)
    }

    fn filter_with<'a>(&'a self, prefix: &mut Vec<&'a str>, keep: &dyn Fn(&str) -> bool) -> Mapping {
        let mut out = Mapping::new();
        for (key, entry) in &self.entries {
            prefix.push(key);
            match entry {
                Entry::Leaf(value) => {
                    if keep(&prefix.join(PATH_SEPARATOR)) {
                        out.insert(key.clone(), Entry::Leaf(value.clone()));
                    }
                }
                Entry::Nested(nested) => {
                    let kept = nested.filter_with(prefix, keep);
                    if !kept.is_empty() {
                        out.insert(key.clone(), Entry::Nested(kept));
                    }
                }
            }
            prefix.pop();
        }
        out
    }

    fn walk_leaves<'a>(
        &'a self,
        prefix: &mut Vec<&'a str>,
        visit: &mut dyn FnMut(&[&'a str], &'a Value),
    ) {
        for (key, entry) in &self.entries {
            prefix.push(key);
            match entry {
                Entry::Leaf(value) => visit(prefix, value),
                Entry::Nested(nested) => nested.walk_leaves(prefix, visit),
            }
            prefix.pop();
        }
    }
}

// Key order is significant, unlike IndexMap's own equality.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, entry)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match entry {
                Entry::Leaf(Value::Str(s)) => write!(f, "{}: {:?}", key, s)?,
                Entry::Leaf(value) => write!(f, "{}: {}", key, value)?,
                Entry::Nested(nested) => write!(f, "{}: {}", key, nested)?,
            }
        }
        f.write_str("}")
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Leaf(value) => value.serialize(serializer),
            Entry::Nested(nested) => nested.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mapping {
        let mut latency = Mapping::new();
        latency.insert("median_ms", Entry::Leaf(Value::from(1.25)));
        latency.insert("p90_ms", Entry::Leaf(Value::from(3.5)));

        let mut m = Mapping::new();
        m.insert("f", Entry::Leaf(Value::from(1)));
        m.insert("latency", Entry::Nested(latency));
        m.insert("state_machine", Entry::Leaf(Value::from("Noop")));
        m
    }

    #[test]
    fn test_get_path() {
        let m = sample();
        assert_eq!(
            m.get_path("latency.median_ms").and_then(Entry::as_leaf),
            Some(&Value::Float(1.25))
        );
        assert!(m.get_path("latency").unwrap().as_nested().is_some());
        assert!(m.get_path("latency.missing").is_none());
        assert!(m.get_path("f.x").is_none());
        assert!(m.get_path("").is_none());
    }

    #[test]
    fn test_leaf_paths_and_count() {
        let m = sample();
        assert_eq!(
            m.leaf_paths(),
            vec!["f", "latency.median_ms", "latency.p90_ms", "state_machine"]
        );
        assert_eq!(m.leaf_count(), 4);
        assert_eq!(m.leaf_paths_with_separator("/")[1], "latency/median_ms");
        assert_eq!(m.leaf_values()[3], &Value::from("Noop"));
    }

    #[test]
    fn test_filter_leaves() {
        let m = sample();
        let latency = m.filter_leaves(|p| p.starts_with("latency."));
        assert_eq!(latency.leaf_paths(), vec!["latency.median_ms", "latency.p90_ms"]);
        assert_eq!(latency.keys().collect::<Vec<_>>(), vec!["latency"]);

        let top = m.filter_leaves(|p| p == "f" || p == "latency.p90_ms");
        assert_eq!(top.to_string(), "{f: 1, latency: {p90_ms: 3.5}}");

        // nested mappings emptied by the filter disappear
        let none = m.filter_leaves(|p| p == "state_machine");
        assert!(none.get("latency").is_none());
        assert_eq!(none.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            r#"{f: 1, latency: {median_ms: 1.25, p90_ms: 3.5}, state_machine: "Noop"}"#
        );
        assert_eq!(Mapping::new().to_string(), "{}");
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let mut a = Mapping::new();
        a.insert("x", Entry::Leaf(Value::from(1)));
        a.insert("y", Entry::Leaf(Value::from(2)));
        let mut b = Mapping::new();
        b.insert("y", Entry::Leaf(Value::from(2)));
        b.insert("x", Entry::Leaf(Value::from(1)));
        assert_ne!(a, b);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"f":1,"latency":{"median_ms":1.25,"p90_ms":3.5},"state_machine":"Noop"}"#
        );
    }
}
