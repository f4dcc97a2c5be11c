//! Scalar metadata bag.
//!
//! An ordered key/value map of scalar values scoped to exactly one owning
//! entity (record, vector or series). Mutation goes through the owning
//! entity's `meta_mut` accessor; the bag itself has no independent lifecycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetaValue {
    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content; integers widen to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Float(v) => Some(*v),
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Text(_) => None,
        }
    }

    /// Integer content
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Int(v) => write!(f, "{}", v),
            MetaValue::Float(v) => write!(f, "{}", v),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Int(value as i64)
    }
}

impl From<usize> for MetaValue {
    fn from(value: usize) -> Self {
        MetaValue::Int(value as i64)
    }
}

/// Ordered scalar metadata map with typed accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(flatten)]
    entries: BTreeMap<String, MetaValue>,
}

impl MetaData {
    /// Empty metadata bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata bag seeded with a `file_name` entry
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        let mut meta = Self::new();
        meta.insert("file_name", file_name.into());
        meta
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// Look up a text value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(MetaValue::as_str)
    }

    /// Look up a numeric value by key
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(MetaValue::as_f64)
    }

    /// Look up an integer value by key
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.entries.get(key).and_then(MetaValue::as_i64)
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.entries.remove(key)
    }

    /// Merge entries from another source, overwriting on key collision
    pub fn update<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetaValue>,
    {
        for (key, value) in entries {
            self.entries.insert(key.into(), value.into());
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Render the bag as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for MetaData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Self::new();
        meta.update(iter);
        meta
    }
}
