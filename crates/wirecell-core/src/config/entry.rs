use serde::Serialize;
use serde_json::{Map, Value};

use crate::component::key::ComponentKey;
use crate::config::error::ConfigError;

/// One validated configuration entry: which component, and the data to
/// configure it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub data: Value,
}

impl ConfigEntry {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, data: Value) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            data,
        }
    }

    pub fn key(&self) -> ComponentKey {
        ComponentKey::new(self.type_name.clone(), self.name.clone())
    }

    /// Whether a raw entry is a no-op: `null` or an empty object.
    pub fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Validate the raw entry at position `index` of a sequence.
    ///
    /// Blank entries yield `Ok(None)`. A missing or `null` name means the
    /// default instance and a missing `data` means no overrides.
    pub fn from_value(index: usize, value: &Value) -> Result<Option<Self>, ConfigError> {
        if Self::is_blank(value) {
            return Ok(None);
        }
        let map = value.as_object().ok_or_else(|| ConfigError::NotAnObject {
            index,
            entry: value.to_string(),
        })?;

        let type_name = match map.get("type") {
            None | Some(Value::Null) => {
                return Err(ConfigError::MissingType {
                    index,
                    entry: value.to_string(),
                });
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    index,
                    field: "type",
                    reason: format!("expected a string, got {}", other),
                });
            }
        };
        let name = match map.get("name") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    index,
                    field: "name",
                    reason: format!("expected a string, got {}", other),
                });
            }
        };
        let data = map.get("data").cloned().unwrap_or(Value::Null);

        Ok(Some(Self::new(type_name, name, data)))
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.type_name.clone()));
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("data".to_string(), self.data.clone());
        Value::Object(map)
    }
}
