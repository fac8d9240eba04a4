//! # WireCellApps
//!
//! Applications that ship with the `wire-cell` front end:
//!
//! - [`ConfigDumper`] writes the default configuration of a list of
//!   components as a configuration sequence.
//! - [`TypeDumper`] writes every registered component type with the
//!   capabilities it provides.
//!
//! The crate builds both as an `rlib`, registered statically by the front
//! end, and as a `cdylib` exporting `register_WireCellApps_Factory` plus one
//! `register_<Type>_Factory` per component type.
use wirecell_core::{ComponentRegistry, RegistryError};

pub mod config_dumper;
pub mod type_dumper;

pub use config_dumper::ConfigDumper;
pub use type_dumper::TypeDumper;

/// Name the plugin is requested by.
pub const PLUGIN_NAME: &str = "WireCellApps";

/// Register every component type this plugin provides.
pub fn register(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_constructor(config_dumper::TYPE_NAME, config_dumper::make_config_dumper)?;
    registry.register_constructor(type_dumper::TYPE_NAME, type_dumper::make_type_dumper)?;
    log::debug!("{} registered its components", PLUGIN_NAME);
    Ok(())
}

wirecell_core::wirecell_plugin!(WireCellApps, register);
wirecell_core::wirecell_factory!(ConfigDumper, config_dumper::make_config_dumper);
wirecell_core::wirecell_factory!(TypeDumper, type_dumper::make_type_dumper);

#[cfg(test)]
mod tests;
