use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use wirecell_core::config::persist;
use wirecell_core::{
    Application, Component, ComponentError, ComponentKey, ConfigSequence, Configurable,
    ExecutionContext,
};

pub const TYPE_NAME: &str = "ConfigDumper";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDumperSettings {
    /// Output file, `-` for stdout.
    pub filename: String,
    /// Component references, `type` or `type:name`.
    pub components: Vec<String>,
}

impl Default for ConfigDumperSettings {
    fn default() -> Self {
        Self {
            filename: "-".to_string(),
            components: vec![TYPE_NAME.to_string()],
        }
    }
}

/// Dumps the default configuration of the listed components.
///
/// A constructed component reports through its live instance; any other known
/// type through a throwaway instance. Unknown components are skipped.
#[derive(Debug, Default)]
pub struct ConfigDumper {
    settings: RwLock<ConfigDumperSettings>,
}

impl ConfigDumper {
    pub fn settings(&self) -> ConfigDumperSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build the sequence this dumper would write.
    pub fn collect(&self, context: &ExecutionContext<'_>) -> ConfigSequence {
        let registry = context.registry();
        let mut sequence = ConfigSequence::new();
        for reference in self.settings().components {
            let key = ComponentKey::parse(&reference);
            let live = registry.find_as::<dyn Configurable>(&key.type_name, &key.name);
            let config = match live {
                Ok(configurable) => configurable.default_configuration(),
                Err(_) => match registry.default_configuration(&key.type_name) {
                    Ok(config) => config,
                    Err(e) => {
                        log::warn!("ConfigDumper: skipping '{}': {}", key, e);
                        continue;
                    }
                },
            };
            sequence.add(config, &key.type_name, &key.name);
        }
        sequence
    }
}

impl Configurable for ConfigDumper {
    fn default_configuration(&self) -> Value {
        json!({"filename": "-", "components": [TYPE_NAME]})
    }

    fn configure(&self, config: &Value) -> Result<(), ComponentError> {
        let settings: ConfigDumperSettings = serde_json::from_value(config.clone())?;
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
        Ok(())
    }
}

impl Application for ConfigDumper {
    fn execute(&self, context: &ExecutionContext<'_>) -> Result<(), ComponentError> {
        let sequence = self.collect(context);
        let filename = self.settings().filename;
        log::info!(
            "ConfigDumper: writing {} configurations to {}",
            sequence.len(),
            filename
        );
        persist::dump(&filename, &sequence.to_value())?;
        Ok(())
    }
}

pub fn make_config_dumper() -> Component {
    Component::builder(ConfigDumper::default())
        .configurable()
        .application()
        .build()
}
