use toml::Table;

use crate::chain::{from_toml_table, Map, Value};

use super::ConfigError;

/// A single layer as loaded from a config source.
pub type Layer = Map<String, toml::Value>;

/// Something that can produce one layer of configuration.
///
/// Returning `Ok(None)` means the source is absent and contributes no layer.
pub trait LayerSource: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Option<Layer>, ConfigError>;
}

/// An in-memory TOML table, typically used for defaults.
#[derive(Debug, Clone)]
pub struct TableSource {
    table: Table,
}

impl TableSource {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl LayerSource for TableSource {
    fn load(&self) -> Result<Option<Layer>, ConfigError> {
        Ok(Some(from_toml_table(self.table.clone())))
    }
}

/// Stores `value` under the nested `path`, creating intermediate mappings.
///
/// A leaf sitting where an intermediate mapping is needed gets replaced.
pub fn insert_at_path(layer: &mut Layer, path: &[String], value: toml::Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        layer.insert(first.clone(), Value::from_toml(value));
        return;
    }

    let slot = layer
        .entry(first.clone())
        .or_insert_with(|| Value::Nested(Map::new()));
    if !slot.is_nested() {
        *slot = Value::Nested(Map::new());
    }
    if let Value::Nested(nested) = slot {
        insert_at_path(nested, rest, value);
    }
}
