//! # Wire-Cell Core
//!
//! Host-side runtime for Wire-Cell components: plugin libraries are loaded and
//! asked to register their constructors, configured components are constructed
//! and then configured from a [`ConfigSequence`](config::ConfigSequence), and
//! designated application components are executed.
pub mod component;
pub mod config;
pub mod kernel;
pub mod plugin_system;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and plugins
pub use component::{
    Application, Component, ComponentError, ComponentKey, ComponentRegistry, Configurable,
    ExecutionContext, RegistryError,
};
pub use config::{ConfigEntry, ConfigError, ConfigSequence};
pub use kernel::{Error, Orchestrator, OrchestratorState, Result};
pub use plugin_system::{PluginLoadError, PluginLoader, PluginSpec};
