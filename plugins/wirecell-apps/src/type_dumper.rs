use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use wirecell_core::config::persist;
use wirecell_core::{
    Application, Component, ComponentError, ComponentRegistry, Configurable, ExecutionContext,
};

pub const TYPE_NAME: &str = "TypeDumper";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDumperSettings {
    pub filename: String,
    /// Types to describe, all known types when empty.
    pub types: Vec<String>,
}

impl Default for TypeDumperSettings {
    fn default() -> Self {
        Self {
            filename: "-".to_string(),
            types: Vec::new(),
        }
    }
}

/// One line of [`TypeDumper`] output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    pub capabilities: Vec<String>,
}

/// Writes the registered component types and the capabilities of each.
#[derive(Debug, Default)]
pub struct TypeDumper {
    settings: RwLock<TypeDumperSettings>,
}

impl TypeDumper {
    pub fn settings(&self) -> TypeDumperSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn records(&self, registry: &ComponentRegistry) -> Vec<TypeRecord> {
        let requested = self.settings().types;
        let types = if requested.is_empty() {
            registry.known_types()
        } else {
            requested
        };

        types
            .into_iter()
            .filter_map(|type_name| match registry.lookup_factory(&type_name) {
                Some(ctor) => {
                    let capabilities = ctor()
                        .capabilities()
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    Some(TypeRecord { type_name, capabilities })
                }
                None => {
                    log::warn!("TypeDumper: unknown component type '{}'", type_name);
                    None
                }
            })
            .collect()
    }
}

impl Configurable for TypeDumper {
    fn default_configuration(&self) -> Value {
        json!({"filename": "-", "types": []})
    }

    fn configure(&self, config: &Value) -> Result<(), ComponentError> {
        let settings: TypeDumperSettings = serde_json::from_value(config.clone())?;
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
        Ok(())
    }
}

impl Application for TypeDumper {
    fn execute(&self, context: &ExecutionContext<'_>) -> Result<(), ComponentError> {
        let records = self.records(context.registry());
        let filename = self.settings().filename;
        log::info!("TypeDumper: writing {} types to {}", records.len(), filename);
        persist::dump(&filename, &serde_json::to_value(&records)?)?;
        Ok(())
    }
}

pub fn make_type_dumper() -> Component {
    Component::builder(TypeDumper::default())
        .configurable()
        .application()
        .build()
}
