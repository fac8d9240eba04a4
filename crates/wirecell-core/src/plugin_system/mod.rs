//! # Plugin System
//!
//! Plugins are shared libraries (or statically linked registration functions)
//! whose only job is to register component constructors with the host's
//! [`ComponentRegistry`](crate::component::ComponentRegistry).
//!
//! - **[`spec`]**: [`PluginSpec`], a parsed `name[:library]` plugin reference.
//! - **[`entry`]**: the `register_<Name>_Factory` entry point convention and the
//!   [`wirecell_plugin!`](crate::wirecell_plugin) and
//!   [`wirecell_factory!`](crate::wirecell_factory) macros that export one.
//! - **[`loader`]**: [`PluginLoader`], which opens libraries, resolves entry
//!   points and invokes each of them at most once.
//! - **[`error`]**: [`PluginLoadError`].
//!
//! Entry points hand a `&mut ComponentRegistry` across the library boundary,
//! so plugins must be built with the same toolchain and the same
//! `wirecell-core` as the host.
pub mod entry;
pub mod error;
pub mod loader;
pub mod spec;

pub use entry::{EntryPointFn, RegisterFn};
pub use error::PluginLoadError;
pub use loader::PluginLoader;
pub use spec::PluginSpec;

#[cfg(test)]
mod tests;
