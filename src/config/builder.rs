use std::path::Path;

use super::env::EnvSource;
use super::file::FileSource;
use super::layers::Layers;
use super::source::{LayerSource, TableSource};
use super::ConfigError;

/// Builder for a [`Layers`] stack loaded from TOML files, environment
/// variables and in-memory tables.
///
/// Sources are registered lowest priority first: each source overrides the
/// ones registered before it. Nested tables are merged key by key at every
/// depth; other values (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use deep_chainmap::Layers;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct MyConfig {
///     name: String,
///     port: u16,
/// }
///
/// let layers = Layers::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let config: MyConfig = layers.extract()?;
/// # Ok::<(), deep_chainmap::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct LayersBuilder {
    sources: Vec<Box<dyn LayerSource>>,
}

impl LayersBuilder {
    /// Adds a TOML file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds a layer built from environment variables with the given prefix.
    ///
    /// Environment variables are mapped to config paths by:
    /// 1. Removing the prefix and separator
    /// 2. Splitting remaining segments on the separator
    /// 3. Converting path segments to lowercase
    ///
    /// Values are coerced from strings to the most specific type:
    /// boolean, integer, float, or string (fallback).
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds an in-memory table, e.g. compiled-in defaults.
    pub fn with_table(self, table: toml::Table) -> Self {
        self.with_source(TableSource::new(table))
    }

    /// Adds any other layer source.
    pub fn with_source(mut self, source: impl LayerSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source and stacks the resulting layers.
    pub fn build(self) -> Result<Layers, ConfigError> {
        let mut layers = Vec::with_capacity(self.sources.len());

        // Highest priority is the last registered source.
        for source in self.sources.iter().rev() {
            if let Some(layer) = source.load()? {
                layers.push(layer);
            }
        }

        tracing::debug!(
            sources = self.sources.len(),
            layers = layers.len(),
            "built layer stack"
        );

        Ok(Layers::new(layers))
    }
}
