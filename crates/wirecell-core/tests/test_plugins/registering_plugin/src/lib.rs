//! Registers real components through the export macros.
//!
//! - `register_Gauges_Factory` registers `Gauge`.
//! - `register_Dial_Factory` is a per-type entry point for `Dial`.
//! - `register_Clash_Factory` registers a second, different `Gauge`.
use std::sync::Mutex;

use serde_json::{json, Value};
use wirecell_core::{Component, ComponentError, ComponentRegistry, Configurable, RegistryError};

/// Accepts a numeric `scale` and keeps the last document it was configured with.
#[derive(Default)]
struct Gauge {
    applied: Mutex<Value>,
}

impl Configurable for Gauge {
    fn default_configuration(&self) -> Value {
        json!({"scale": 1.0, "unit": "mV"})
    }

    fn configure(&self, config: &Value) -> Result<(), ComponentError> {
        if !config["scale"].is_number() {
            return Err(ComponentError::invalid_configuration("scale must be a number"));
        }
        *self.applied.lock().unwrap_or_else(|e| e.into_inner()) = config.clone();
        Ok(())
    }
}

struct Dial;

impl Configurable for Dial {
    fn default_configuration(&self) -> Value {
        json!({"position": 0})
    }

    fn configure(&self, _config: &Value) -> Result<(), ComponentError> {
        Ok(())
    }
}

fn make_gauge() -> Component {
    Component::builder(Gauge::default()).configurable().build()
}

fn make_other_gauge() -> Component {
    Component::builder(Dial).configurable().build()
}

fn make_dial() -> Component {
    Component::builder(Dial).configurable().build()
}

fn register_gauges(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_constructor("Gauge", make_gauge)
}

fn register_clash(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_constructor("Gauge", make_other_gauge)
}

wirecell_core::wirecell_plugin!(Gauges, register_gauges);
wirecell_core::wirecell_plugin!(Clash, register_clash);
wirecell_core::wirecell_factory!(Dial, make_dial);
