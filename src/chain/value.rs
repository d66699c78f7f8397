use std::collections::BTreeMap;

/// An ordered-key mapping whose values are leaves or further mappings.
pub type Map<K, V> = BTreeMap<K, Value<K, V>>;

/// A value stored in a layer.
///
/// Only `Nested` values take part in recursive lookup and merging. Anything
/// else, sequences included, is an opaque leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<K, V> {
    Leaf(V),
    Nested(Map<K, V>),
}

impl<K, V> Value<K, V> {
    /// Returns the leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Value::Leaf(v) => Some(v),
            Value::Nested(_) => None,
        }
    }

    /// Returns the nested mapping, if this is a mapping.
    pub fn as_nested(&self) -> Option<&Map<K, V>> {
        match self {
            Value::Leaf(_) => None,
            Value::Nested(m) => Some(m),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Value::Nested(_))
    }
}

impl Value<String, toml::Value> {
    /// Converts a TOML value. Tables become mappings; arrays stay leaves.
    pub fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::Table(table) => Value::Nested(from_toml_table(table)),
            other => Value::Leaf(other),
        }
    }

    pub fn into_toml(self) -> toml::Value {
        match self {
            Value::Leaf(v) => v,
            Value::Nested(map) => toml::Value::Table(into_toml_table(map)),
        }
    }
}

/// Converts a TOML table into a layer.
pub fn from_toml_table(table: toml::Table) -> Map<String, toml::Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, Value::from_toml(value)))
        .collect()
}

/// Converts a layer (or a flattened result) back into a TOML table.
pub fn into_toml_table(map: Map<String, toml::Value>) -> toml::Table {
    map.into_iter()
        .map(|(key, value)| (key, value.into_toml()))
        .collect()
}
