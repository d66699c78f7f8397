use serde::de::DeserializeOwned;

use crate::chain::{into_toml_table, DeepChainMap};

use super::builder::LayersBuilder;
use super::source::Layer;
use super::ConfigError;

/// An owned stack of configuration layers, highest priority first.
///
/// Use [`view`](Self::view) for layered lookups and [`extract`](Self::extract)
/// to deserialize the merged result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers {
    layers: Vec<Layer>,
}

impl Layers {
    pub fn builder() -> LayersBuilder {
        LayersBuilder::default()
    }

    /// Wraps already-loaded layers, highest priority first.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Returns a layered view borrowing every layer.
    pub fn view(&self) -> DeepChainMap<'_, String, toml::Value> {
        self.layers.iter().collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Flattens the stack and deserializes it into `T`.
    ///
    /// This performs deserialization once rather than on each access.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let merged = into_toml_table(self.view().flatten());
        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize, PartialEq)]
    struct AppConfig {
        name: String,
        server: Server,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn make_table(toml_str: &str) -> toml::Table {
        toml::from_str(toml_str).unwrap()
    }

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let defaults = make_table(
            r#"
            name = "app"
            [server]
            host = "0.0.0.0"
            port = 80
            tags = ["a", "b"]
            "#,
        );
        let local = write_file(
            r#"
            [server]
            port = 8080
            tags = ["c"]
            "#,
        );

        let layers = Layers::builder()
            .with_table(defaults)
            .with_file(local.path(), true)
            .build()
            .unwrap();

        let config: AppConfig = layers.extract().unwrap();
        assert_eq!(
            config,
            AppConfig {
                name: "app".into(),
                server: Server {
                    host: "0.0.0.0".into(),
                    port: 8080,
                    tags: vec!["c".into()],
                },
            }
        );
    }

    #[test]
    fn test_view_keeps_layers_separate() {
        let layers = Layers::builder()
            .with_table(make_table("[server]\nport = 80"))
            .with_table(make_table("[server]\nhost = \"localhost\""))
            .build()
            .unwrap();

        assert_eq!(layers.len(), 2);

        let server = layers.view().lookup("server").unwrap().into_nested().unwrap();
        assert_eq!(server.maps().len(), 2);
        assert_eq!(
            server.lookup("host").unwrap().as_leaf(),
            Some(&toml::Value::String("localhost".into()))
        );
        assert_eq!(
            server.lookup("port").unwrap().as_leaf(),
            Some(&toml::Value::Integer(80))
        );
    }

    #[test]
    fn test_missing_optional_file_adds_no_layer() {
        let layers = Layers::builder()
            .with_table(make_table("name = \"app\""))
            .with_file("/nonexistent/path/local.toml", false)
            .build()
            .unwrap();

        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let result = Layers::builder()
            .with_file("/nonexistent/path/default.toml", true)
            .build();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        std::env::set_var("DEEPCHAIN_LAYERS_TEST__SERVER__PORT", "9090");
        let file = write_file(
            r#"
            name = "app"
            [server]
            host = "localhost"
            port = 80
            "#,
        );

        let layers = Layers::builder()
            .with_file(file.path(), true)
            .with_env("DEEPCHAIN_LAYERS_TEST", "__")
            .build()
            .unwrap();

        let config: AppConfig = layers.extract().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "localhost");
    }

    #[test]
    fn test_extract_type_mismatch() {
        let layers = Layers::builder()
            .with_table(make_table("name = 5"))
            .build()
            .unwrap();

        let result = layers.extract::<AppConfig>();
        assert!(matches!(result, Err(ConfigError::DeserializeError(_))));
    }

    #[test]
    fn test_empty_stack() {
        let layers = Layers::builder().build().unwrap();

        assert!(layers.is_empty());
        assert!(layers.view().lookup("name").is_err());
        assert!(layers.view().flatten().is_empty());
    }
}
