use std::ffi::OsString;

use toml::Value;

use super::source::{insert_at_path, Layer, LayerSource};
use super::ConfigError;

/// A layer built from environment variables sharing a prefix.
///
/// `MYAPP__DATABASE__HOST=db` with prefix `MYAPP` and separator `__` lands at
/// `database.host`. Path segments are lowercased.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }

    /// Builds a layer from the given variables instead of the process environment.
    ///
    /// Variables whose name is not valid UTF-8 are skipped. A matching variable
    /// whose value is not valid UTF-8 is an error.
    fn layer_from<I>(&self, vars: I) -> Result<Layer, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator(self.prefix.clone()));
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);

        let mut matched: Vec<(Vec<String>, String, Value)> = Vec::new();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                tracing::trace!("skipping environment variable with non-UTF-8 name");
                continue;
            };
            let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }
            let value = value
                .into_string()
                .map_err(|_| ConfigError::NonUnicodeEnvValue(key.clone()))?;
            let path: Vec<String> = path_str
                .split(&self.separator)
                .map(|s| s.to_lowercase())
                .collect();
            matched.push((path, key, coerce_value(&value)));
        }

        // Shorter paths first, then by variable name for paths that collide after
        // lowercasing, so the outcome doesn't depend on environment order.
        matched.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        tracing::debug!(
            prefix = %self.prefix,
            count = matched.len(),
            "collected environment overrides"
        );

        let mut layer = Layer::new();
        for (path, _, value) in matched {
            insert_at_path(&mut layer, &path, value);
        }
        Ok(layer)
    }
}

impl LayerSource for EnvSource {
    fn load(&self) -> Result<Option<Layer>, ConfigError> {
        self.layer_from(std::env::vars_os()).map(Some)
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
