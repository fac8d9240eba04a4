//! # Components and the Component Registry
//!
//! Components are the units Wire-Cell plugins provide. Each one is registered
//! under a *type* name together with a constructor, and lives in the registry
//! under a [`ComponentKey`] (`type` plus instance `name`).
//!
//! - **[`traits`]**: the capability interfaces ([`Configurable`], [`Application`]),
//!   the [`Component`] handle bundling the capabilities of one object, and the
//!   [`ExecutionContext`] handed to applications.
//! - **[`registry`]**: [`FactoryRegistry`], the get-or-create table of constructors
//!   and live instances, and the [`ComponentRegistry`] alias the host uses.
//! - **[`key`]**: [`ComponentKey`] and its `type[:name]` reference syntax.
//! - **[`error`]**: [`RegistryError`] and [`ComponentError`].
pub mod error;
pub mod key;
pub mod registry;
pub mod traits;

pub use error::{ComponentError, RegistryError};
pub use key::ComponentKey;
pub use registry::{ComponentRegistry, Constructor, FactoryRegistry};
pub use traits::{Application, Capability, Component, ComponentBuilder, Configurable, ExecutionContext};
