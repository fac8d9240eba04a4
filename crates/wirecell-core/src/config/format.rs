use std::path::Path;

use serde_json::Value;

use crate::config::error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "YAML",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "TOML",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Parse `text` read from `path` into a document.
    ///
    /// TOML has no top-level arrays, so a TOML file holding a sequence puts
    /// it under an `entries` array of tables.
    pub fn parse(&self, text: &str, path: &Path) -> Result<Value, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format: self.name(),
            message,
        };
        match self {
            ConfigFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                if text.trim().is_empty() {
                    return Ok(Value::Null);
                }
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                let value: Value = toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
                match value {
                    Value::Object(mut table) if table.len() == 1 && table.contains_key("entries") => {
                        match table.remove("entries") {
                            Some(entries @ Value::Array(_)) => Ok(entries),
                            Some(other) => Err(parse_error(format!(
                                "'entries' must be an array of tables, got {}",
                                other
                            ))),
                            None => Ok(Value::Null),
                        }
                    }
                    other => Ok(other),
                }
            }
        }
    }
}
