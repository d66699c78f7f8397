//! File-based configuration layers.

use std::path::{Path, PathBuf};

use crate::chain::from_toml_table;

use super::source::{Layer, LayerSource};
use super::ConfigError;

/// A layer loaded from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist contribute no layer.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl LayerSource for FileSource {
    fn load(&self) -> Result<Option<Layer>, ConfigError> {
        Ok(load_config_file(&self.path, self.required)?.map(from_toml_table))
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<toml::Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                tracing::trace!(path = %path.display(), "optional config file missing, skipping");
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_loads_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "key = \"value\"").unwrap();
        writeln!(file, "[section]").unwrap();
        writeln!(file, "nested = 1").unwrap();

        let layer = FileSource::new(file.path(), true).load().unwrap().unwrap();

        assert_eq!(
            layer["key"].as_leaf(),
            Some(&toml::Value::String("value".into()))
        );
        assert!(layer["section"].is_nested());
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/config.toml", true);
        let result = source.load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/config.toml", false);

        assert!(source.load().unwrap().is_none());
    }

    #[test]
    fn test_file_source_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "key = ").unwrap();

        let result = FileSource::new(file.path(), false).load();

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
